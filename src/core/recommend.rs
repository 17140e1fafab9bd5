// src/core/recommend.rs
//
// Maintenance advice derived from the assessment. Pure lookup: the damage
// level advisory comes first, then one advisory per detected fault, in the
// order the classifier reported them.

use crate::core::classifier::{DamageLevel, FaultIndication, FaultType};

/// Build the advisory list for a damage level and its detected faults.
pub fn recommend(damage_level: DamageLevel, fault_types: &[FaultIndication]) -> Vec<String> {
    let mut recommendations: Vec<String> = Vec::new();

    match damage_level {
        DamageLevel::Healthy => {
            recommendations
                .push("System is operating normally. Continue routine monitoring.".to_string());
        }
        DamageLevel::Slight => {
            recommendations
                .push("Minor abnormalities detected. Increase monitoring frequency.".to_string());
        }
        DamageLevel::Moderate => {
            recommendations
                .push("Moderate wear detected. Schedule inspection within 2-4 weeks.".to_string());
        }
        DamageLevel::Severe => {
            recommendations
                .push("Severe damage detected. Schedule immediate inspection.".to_string());
            recommendations
                .push("Consider reducing operational load until maintenance.".to_string());
        }
        DamageLevel::Critical => {
            recommendations.push(
                "CRITICAL: Shutdown recommended to prevent catastrophic failure.".to_string(),
            );
            recommendations.push("Immediate maintenance required.".to_string());
        }
    }

    for fault in fault_types {
        if let Some(advice) = fault_advice(fault.fault_type) {
            recommendations.push(advice.to_string());
        }
    }

    recommendations
}

fn fault_advice(fault: FaultType) -> Option<&'static str> {
    match fault {
        FaultType::BearingFault => {
            Some("Inspect bearings for wear, contamination, or lubrication issues.")
        }
        FaultType::Unbalance => Some("Check rotor balance and perform balancing if necessary."),
        FaultType::Misalignment => Some("Check shaft alignment and realign if necessary."),
        FaultType::GearFault => Some("Inspect gear teeth for wear, pitting, or damage."),
        FaultType::GeneralAbnormality => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn indication(fault_type: FaultType) -> FaultIndication {
        FaultIndication {
            fault_type,
            confidence: 0.6,
            description: fault_type.description().to_string(),
        }
    }

    #[test]
    fn test_healthy_advisory_is_single() {
        let recs = recommend(DamageLevel::Healthy, &[]);
        assert_eq!(recs.len(), 1);
        assert!(recs[0].contains("normally"));
    }

    #[test]
    fn test_critical_advisory_carries_followup() {
        let recs = recommend(DamageLevel::Critical, &[]);
        assert_eq!(recs.len(), 2);
        assert!(recs[0].starts_with("CRITICAL"));
    }

    #[test]
    fn test_damage_advisory_precedes_fault_advisories() {
        let faults = [
            indication(FaultType::GearFault),
            indication(FaultType::BearingFault),
        ];
        let recs = recommend(DamageLevel::Moderate, &faults);
        assert_eq!(recs.len(), 3);
        assert!(recs[0].contains("Moderate wear"));
        assert!(recs[1].contains("gear teeth"));
        assert!(recs[2].contains("bearings"));
    }

    #[test]
    fn test_general_abnormality_has_no_specific_advice() {
        let recs = recommend(DamageLevel::Slight, &[indication(FaultType::GeneralAbnormality)]);
        assert_eq!(recs.len(), 1);
    }

    #[test]
    fn test_output_is_deterministic() {
        let faults = [indication(FaultType::Unbalance)];
        assert_eq!(
            recommend(DamageLevel::Severe, &faults),
            recommend(DamageLevel::Severe, &faults)
        );
    }
}
