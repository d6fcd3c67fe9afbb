// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Architecture Duel Arena - Input Validation
//
// Checks applied where architectures and profiles enter the system. The
// orchestrator itself trusts its inputs.

use crate::threshold::{MAX_INSTANCES, MAX_RPS};
use crate::types::{Architecture, ComputeType, Consistency, DatabaseType, TrafficProfile};

pub const MIN_INSTANCES: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("compute instances must be between {min} and {max}, got {got}")]
    InstancesOutOfRange { got: u32, min: u32, max: u32 },

    #[error("stateful compute cannot autoscale safely")]
    StatefulAutoscale,

    #[error("eventual consistency requires a replicated database")]
    EventualRequiresReplication,

    #[error("traffic rate `{field}` must be at least 1 rps")]
    NonPositiveRate { field: &'static str },

    #[error("traffic rate `{field}` must be at most {max} rps")]
    RateTooHigh { field: &'static str, max: u32 },
}

pub fn validate_architecture(arch: &Architecture) -> Result<(), ValidationError> {
    let instances = arch.compute.instances;
    if !(MIN_INSTANCES..=MAX_INSTANCES).contains(&instances) {
        return Err(ValidationError::InstancesOutOfRange {
            got: instances,
            min: MIN_INSTANCES,
            max: MAX_INSTANCES,
        });
    }

    if arch.compute.kind == ComputeType::Stateful && arch.compute.autoscale {
        return Err(ValidationError::StatefulAutoscale);
    }

    if arch.database.kind == DatabaseType::Single
        && arch.database.consistency == Consistency::Eventual
    {
        return Err(ValidationError::EventualRequiresReplication);
    }

    Ok(())
}

pub fn validate_profile(profile: &TrafficProfile) -> Result<(), ValidationError> {
    let rates = [
        ("warmupRps", profile.warmup_rps),
        ("rampToRps", profile.ramp_to_rps),
        ("spikeRps", profile.spike_rps),
        ("sustainRps", profile.sustain_rps),
    ];

    for (field, rate) in rates {
        if rate == 0 {
            return Err(ValidationError::NonPositiveRate { field });
        }
        if rate > MAX_RPS {
            return Err(ValidationError::RateTooHigh { field, max: MAX_RPS });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::*;

    #[test]
    fn test_house_is_valid() {
        assert_eq!(validate_architecture(&Architecture::house()), Ok(()));
        assert_eq!(validate_profile(&TrafficProfile::default()), Ok(()));
    }

    #[test]
    fn test_instance_bounds() {
        let mut arch = Architecture::house();
        arch.compute.instances = 0;
        assert!(matches!(
            validate_architecture(&arch),
            Err(ValidationError::InstancesOutOfRange { got: 0, .. })
        ));

        arch.compute.instances = MAX_INSTANCES;
        assert_eq!(validate_architecture(&arch), Ok(()));

        arch.compute.instances = MAX_INSTANCES + 1;
        assert!(validate_architecture(&arch).is_err());
    }

    #[test]
    fn test_stateful_autoscale_rejected() {
        let mut arch = Architecture::house();
        arch.compute.kind = ComputeType::Stateful;
        assert_eq!(validate_architecture(&arch), Err(ValidationError::StatefulAutoscale));
    }

    #[test]
    fn test_single_eventual_rejected() {
        let mut arch = Architecture::house();
        arch.database.kind = DatabaseType::Single;
        assert_eq!(
            validate_architecture(&arch),
            Err(ValidationError::EventualRequiresReplication)
        );
    }

    #[test]
    fn test_zero_rate_names_field() {
        let profile = TrafficProfile {
            spike_rps: 0,
            ..TrafficProfile::default()
        };
        let err = validate_profile(&profile).unwrap_err();
        assert_eq!(err, ValidationError::NonPositiveRate { field: "spikeRps" });
        assert_eq!(err.to_string(), "traffic rate `spikeRps` must be at least 1 rps");
    }

    #[test]
    fn test_rate_ceiling() {
        let at_limit = TrafficProfile {
            warmup_rps: MAX_RPS,
            ramp_to_rps: MAX_RPS,
            spike_rps: MAX_RPS,
            sustain_rps: MAX_RPS,
        };
        assert_eq!(validate_profile(&at_limit), Ok(()));

        let huge = TrafficProfile {
            warmup_rps: 200_000_000,
            ramp_to_rps: 200_000_000,
            spike_rps: 1,
            sustain_rps: 1,
        };
        assert_eq!(
            validate_profile(&huge),
            Err(ValidationError::RateTooHigh { field: "warmupRps", max: MAX_RPS })
        );

        let max_sustain = TrafficProfile {
            sustain_rps: u32::MAX,
            ..TrafficProfile::default()
        };
        let err = validate_profile(&max_sustain).unwrap_err();
        assert_eq!(err, ValidationError::RateTooHigh { field: "sustainRps", max: MAX_RPS });
        assert_eq!(err.to_string(), "traffic rate `sustainRps` must be at most 2000 rps");
    }

    #[test]
    fn test_accepted_profiles_stay_short() {
        let widest = TrafficProfile {
            warmup_rps: MAX_RPS,
            ramp_to_rps: MAX_RPS,
            spike_rps: MAX_RPS,
            sustain_rps: MAX_RPS,
        };
        let longest_ramp = TrafficProfile {
            warmup_rps: 1,
            ramp_to_rps: MAX_RPS,
            ..widest
        };
        for profile in [widest, longest_ramp] {
            assert_eq!(validate_profile(&profile), Ok(()));
            assert!(crate::traffic::build_timeline(&profile).len() < 300);
        }
    }
}
