/// The fixed system instruction sent with every request.
///
/// It defines the model's role, the analysis steps and the shape of the HTML it must
/// return. The text is a data asset shipped with the crate; bump `version` whenever
/// it changes so generated reports can be traced back to the instruction that
/// produced them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SystemContract {
    pub version: &'static str,
    pub text: &'static str,
}

impl SystemContract {
    /// Medical report analysis rendered as a self-contained Tailwind HTML page.
    pub const MEDICAL_REPORT: SystemContract = SystemContract {
        version: "1",
        text: include_str!("system_instruction.md"),
    };
}

impl Default for SystemContract {
    fn default() -> Self {
        Self::MEDICAL_REPORT
    }
}

/// Wording the disclaimer banner must carry verbatim.
pub const DISCLAIMER: &str = "⚠️ I am an AI assistant and NOT a medical professional. The analysis below is for informational purposes only and is NOT a diagnosis. Always consult with a qualified doctor.";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_medical_contract_output_requirements() {
        let text = SystemContract::MEDICAL_REPORT.text;
        assert!(text.contains(DISCLAIMER));
        assert!(text.contains(
            "Test/Parameter, Result, Reference Range, Status (High/Low/Critical), Potential Significance"
        ));
        assert!(text.contains("Preliminary Differential Diagnosis"));
        assert!(text.contains("NO EXTERNAL IMAGES"));
        assert!(text.ends_with("Start immediately with <!DOCTYPE html>."));
    }
}
