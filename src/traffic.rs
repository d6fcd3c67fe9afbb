// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Architecture Duel Arena - Traffic Timeline
//
// Expands a traffic profile into the ordered request-rate samples both players
// are evaluated against: warmup, ramp, a single spike, then a fixed sustain.

use crate::threshold::{RAMP_STEP_RPS, SUSTAIN_TICKS, WARMUP_STEP_RPS};
use crate::types::TrafficProfile;

/// Build the request-rate timeline for `profile`.
///
/// The same profile always yields the same sequence.
pub fn build_timeline(profile: &TrafficProfile) -> Vec<u32> {
    let mut timeline = Vec::new();

    // Warmup: 10, 20, ... up to and including warmup_rps
    timeline.extend((1..=profile.warmup_rps / WARMUP_STEP_RPS).map(|i| i * WARMUP_STEP_RPS));

    // Ramp: warmup_rps in steps of 40, always landing on ramp_to_rps
    if profile.warmup_rps <= profile.ramp_to_rps {
        let mut rate = profile.warmup_rps;
        while rate < profile.ramp_to_rps {
            timeline.push(rate);
            rate = rate.saturating_add(RAMP_STEP_RPS);
        }
        timeline.push(profile.ramp_to_rps);
    }

    timeline.push(profile.spike_rps);
    timeline.extend(std::iter::repeat(profile.sustain_rps).take(SUSTAIN_TICKS));

    timeline
}
