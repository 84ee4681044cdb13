//! The result of a complete workflow run.

use crate::context::RunIdentity;
use crate::core::{StageId, StageOutput, StageStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Name recorded in every report.
pub const WORKFLOW_NAME: &str = "HAILEI Complete Workflow";

/// Timing and summary fields of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunMetadata {
    /// When the run started.
    pub start_time: DateTime<Utc>,
    /// When the last stage finished.
    pub end_time: DateTime<Utc>,
    /// Wall-clock duration in seconds.
    pub elapsed_seconds: f64,
    /// Number of stages that returned a completed output.
    pub stages_succeeded: usize,
    /// Whether the audit cleared the course for deployment.
    pub final_approval: bool,
    /// The review's engagement score.
    pub quality_score: Option<u64>,
    /// The audit's inclusivity score.
    pub ethical_clearance: Option<u64>,
}

/// Everything the workflow produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinalReport {
    /// Workflow name.
    pub workflow: String,
    /// Overall status; `completed` for every report that is returned.
    pub status: StageStatus,
    /// Course title as carried by the final output.
    pub course_title: String,
    /// Run correlation ID.
    pub run_id: Uuid,
    /// Stages in the order they ran.
    pub stages_executed: Vec<StageId>,
    /// Agent names in the order they ran.
    pub agents_processed: Vec<String>,
    /// The terminal stage's output, carrying every upstream field.
    pub final_output: StageOutput,
    /// Timing and summary fields.
    pub run_metadata: RunMetadata,
}

impl FinalReport {
    pub(crate) fn assemble(run: &RunIdentity, stages_executed: Vec<StageId>, final_output: StageOutput) -> Self {
        let end_time = Utc::now();
        let elapsed = end_time - run.started_at;
        let elapsed_seconds = elapsed
            .to_std()
            .map_or(0.0, |duration| duration.as_secs_f64());

        let final_approval = final_output
            .pointer("/final_approval/ready_for_deployment")
            .and_then(serde_json::Value::as_bool)
            .unwrap_or(false);
        let quality_score = final_output
            .pointer("/quality_metrics/engagement_score")
            .and_then(serde_json::Value::as_u64);
        let ethical_clearance = final_output
            .pointer("/ethical_audit/inclusivity_score")
            .and_then(serde_json::Value::as_u64);

        Self {
            workflow: WORKFLOW_NAME.to_string(),
            status: final_output.status,
            course_title: final_output.course_title.clone(),
            run_id: run.run_id,
            agents_processed: stages_executed
                .iter()
                .map(|stage| stage.agent_name().to_string())
                .collect(),
            run_metadata: RunMetadata {
                start_time: run.started_at,
                end_time,
                elapsed_seconds,
                stages_succeeded: stages_executed.len(),
                final_approval,
                quality_score,
                ethical_clearance,
            },
            stages_executed,
            final_output,
        }
    }

    /// Returns true if the run completed and the audit approved deployment.
    #[must_use]
    pub fn ready_for_deployment(&self) -> bool {
        self.status.is_completed() && self.run_metadata.final_approval
    }

    /// Converts the report to JSON.
    pub fn to_json(&self) -> Result<serde_json::Value, crate::errors::HaileiError> {
        Ok(serde_json::to_value(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_assemble_reads_summary_fields() {
        let run = RunIdentity::new();
        let output = StageOutput::completed(StageId::EthicsAudit, "Stats", "1.0")
            .with_value("final_approval", json!({"ready_for_deployment": true}))
            .with_value("quality_metrics", json!({"engagement_score": 91}))
            .with_value("ethical_audit", json!({"inclusivity_score": 96}));

        let report = FinalReport::assemble(&run, StageId::ALL.to_vec(), output);

        assert_eq!(report.workflow, WORKFLOW_NAME);
        assert_eq!(report.agents_processed[0], "IPDAi");
        assert_eq!(report.run_metadata.stages_succeeded, 6);
        assert_eq!(report.run_metadata.quality_score, Some(91));
        assert_eq!(report.run_metadata.ethical_clearance, Some(96));
        assert!(report.ready_for_deployment());
        assert!(report.run_metadata.elapsed_seconds >= 0.0);
    }

    #[test]
    fn test_missing_approval_is_not_ready() {
        let output = StageOutput::completed(StageId::EthicsAudit, "Stats", "1.0");
        let report = FinalReport::assemble(&RunIdentity::new(), vec![StageId::EthicsAudit], output);
        assert!(!report.ready_for_deployment());
        assert_eq!(report.run_metadata.quality_score, None);
    }
}
