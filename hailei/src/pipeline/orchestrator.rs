//! Sequential driver for the six stages.

use super::FinalReport;
use crate::config::HaileiConfig;
use crate::context::{RunIdentity, StageContext};
use crate::core::{StageId, StageOutput};
use crate::errors::{HaileiError, UnhandledStageError, UpstreamNotCompletedError};
use crate::events::{
    EventSink, NoOpEventSink, PIPELINE_COMPLETED, PIPELINE_FAILED, PIPELINE_REJECTED,
    PIPELINE_STARTED, STAGE_COMPLETED, STAGE_FAILED, STAGE_STARTED,
};
use crate::generation::{build_generator, ContentGenerator, TemplateGenerator};
use crate::model::CourseInput;
use crate::observability::workflow_summary;
use crate::stages::{default_stages, Stage};
use serde_json::{json, Map, Value};
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// Runs the pipeline stages in order, feeding each stage's full output to
/// the next.
///
/// Holds no per-run state, so one orchestrator can serve concurrent runs.
#[derive(Clone)]
pub struct Orchestrator {
    stages: Vec<Arc<dyn Stage>>,
    config: HaileiConfig,
    events: Arc<dyn EventSink>,
}

impl fmt::Debug for Orchestrator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Orchestrator")
            .field("stages", &self.stage_names())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Orchestrator {
    /// Creates an orchestrator whose Plan stage uses the generator the
    /// configuration selects.
    #[must_use]
    pub fn new(config: HaileiConfig) -> Self {
        let generator = build_generator(&config.generation);
        Self::with_generator(config, generator)
    }

    /// Creates an orchestrator around a specific generator.
    #[must_use]
    pub fn with_generator(config: HaileiConfig, generator: Arc<dyn ContentGenerator>) -> Self {
        Self::from_stages(config, default_stages(generator))
    }

    /// Creates an orchestrator that never calls the remote service.
    #[must_use]
    pub fn template_only() -> Self {
        Self::with_generator(HaileiConfig::template_only(), Arc::new(TemplateGenerator::new()))
    }

    /// Creates an orchestrator over an explicit stage list.
    #[must_use]
    pub fn from_stages(config: HaileiConfig, stages: Vec<Arc<dyn Stage>>) -> Self {
        Self {
            stages,
            config,
            events: Arc::new(NoOpEventSink),
        }
    }

    /// Sets the event sink.
    #[must_use]
    pub fn with_event_sink(mut self, events: Arc<dyn EventSink>) -> Self {
        self.events = events;
        self
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &HaileiConfig {
        &self.config
    }

    /// Returns the stage names in execution order.
    #[must_use]
    pub fn stage_names(&self) -> Vec<&str> {
        self.stages.iter().map(|stage| stage.name()).collect()
    }

    /// Runs every stage for `input`.
    ///
    /// The input is validated before any stage runs. The run stops at the
    /// first stage that does not complete, and that stage's error becomes
    /// the result. A configured workflow timeout bounds the whole run. An
    /// invalid configuration is reported before anything runs.
    pub async fn run_complete_workflow(&self, input: CourseInput) -> Result<FinalReport, HaileiError> {
        self.config.validate()?;
        match self.config.workflow_timeout() {
            Some(timeout) => self.run_with_timeout(input, timeout).await,
            None => self.run_workflow(input).await,
        }
    }

    /// Runs every stage for `input`, giving up after `timeout`.
    pub async fn run_with_timeout(
        &self,
        input: CourseInput,
        timeout: Duration,
    ) -> Result<FinalReport, HaileiError> {
        tokio::time::timeout(timeout, self.run_workflow(input))
            .await
            .map_err(|_| {
                warn!(timeout_seconds = timeout.as_secs_f64(), "Workflow timed out");
                HaileiError::Timeout {
                    seconds: timeout.as_secs_f64(),
                }
            })?
    }

    /// Runs a single stage against an arbitrary input mapping.
    ///
    /// `name` may be the stage name, the route key, or the agent name. An
    /// error-status output is returned as `Ok`, like any other output.
    pub async fn run_stage(&self, name: &str, input: Map<String, Value>) -> Result<StageOutput, HaileiError> {
        let id: StageId = name.parse()?;
        let stage = self
            .stages
            .iter()
            .find(|stage| stage.id() == id)
            .ok_or_else(|| HaileiError::UnknownStage(name.to_string()))?;

        let run = RunIdentity::new();
        let ctx = self.stage_context(&run, id, input);
        self.execute_stage(stage.as_ref(), &ctx).await
    }

    async fn run_workflow(&self, input: CourseInput) -> Result<FinalReport, HaileiError> {
        let run = RunIdentity::new();
        let run_id = run.run_id.to_string();

        self.events.try_emit(
            PIPELINE_STARTED,
            Some(json!({
                "run_id": run_id,
                "course_title": input.title,
                "stages": self.stage_names(),
            })),
        );

        if let Err(err) = input.validate() {
            warn!(run_id = %run_id, fields = ?err.fields, "Course input rejected");
            self.events.try_emit(
                PIPELINE_REJECTED,
                Some(json!({"run_id": run_id, "fields": err.fields})),
            );
            return Err(err.into());
        }

        let mut next_input = match serde_json::to_value(&input)? {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        let mut executed = Vec::with_capacity(self.stages.len());
        let mut last_output = None;

        for stage in &self.stages {
            let ctx = self.stage_context(&run, stage.id(), next_input);
            let result = self
                .execute_stage(stage.as_ref(), &ctx)
                .await
                .and_then(|output| Self::require_completed(stage.id(), output));

            let output = match result {
                Ok(output) => output,
                Err(err) => {
                    self.events.try_emit(
                        PIPELINE_FAILED,
                        Some(json!({
                            "run_id": run_id,
                            "stage": stage.name(),
                            "error": err.to_string(),
                        })),
                    );
                    return Err(err);
                }
            };

            executed.push(stage.id());
            next_input = output.to_map()?;
            last_output = Some(output);
        }

        let final_output = last_output
            .ok_or_else(|| HaileiError::Config("no stages configured".to_string()))?;
        let report = FinalReport::assemble(&run, executed, final_output);

        info!(
            run_id = %run_id,
            course_title = %report.course_title,
            elapsed_seconds = report.run_metadata.elapsed_seconds,
            ready_for_deployment = report.ready_for_deployment(),
            "Workflow completed"
        );
        self.events
            .try_emit(PIPELINE_COMPLETED, Some(workflow_summary(&report)));
        Ok(report)
    }

    fn stage_context(&self, run: &RunIdentity, stage: StageId, input: Map<String, Value>) -> StageContext {
        StageContext::new(stage, input)
            .with_run(run.clone())
            .with_event_sink(self.events.clone())
            .with_agent_version(&self.config.agent_version)
    }

    /// Runs one stage with events and logging. Unexpected errors are
    /// attributed to the stage; validation errors pass through unchanged.
    async fn execute_stage(&self, stage: &dyn Stage, ctx: &StageContext) -> Result<StageOutput, HaileiError> {
        ctx.try_emit_event(STAGE_STARTED, None);
        let start = Instant::now();

        let result = stage.execute(ctx).await;
        let duration_ms = start.elapsed().as_secs_f64() * 1000.0;

        match result {
            Ok(output) if output.is_completed() => {
                info!(
                    run_id = %ctx.run().run_id,
                    stage = stage.name(),
                    duration_ms,
                    "Stage completed"
                );
                ctx.try_emit_event(STAGE_COMPLETED, Some(json!({"duration_ms": duration_ms})));
                Ok(output)
            }
            Ok(output) => {
                warn!(
                    run_id = %ctx.run().run_id,
                    stage = stage.name(),
                    reason = output.reason.as_deref().unwrap_or(""),
                    "Stage returned an error output"
                );
                ctx.try_emit_event(
                    STAGE_FAILED,
                    Some(json!({"duration_ms": duration_ms, "reason": output.reason})),
                );
                Ok(output)
            }
            Err(err) => {
                let err = match err {
                    HaileiError::Validation(_) | HaileiError::Stage(_) => err,
                    other => UnhandledStageError::new(stage.id().agent_name(), other.to_string()).into(),
                };
                warn!(
                    run_id = %ctx.run().run_id,
                    stage = stage.name(),
                    error = %err,
                    "Stage failed"
                );
                ctx.try_emit_event(
                    STAGE_FAILED,
                    Some(json!({"duration_ms": duration_ms, "error": err.to_string()})),
                );
                Err(err)
            }
        }
    }

    fn require_completed(stage: StageId, output: StageOutput) -> Result<StageOutput, HaileiError> {
        if output.is_completed() {
            Ok(output)
        } else {
            let reason = output
                .reason
                .unwrap_or_else(|| "stage did not complete".to_string());
            Err(UpstreamNotCompletedError::new(stage, reason).into())
        }
    }
}
