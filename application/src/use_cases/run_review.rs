//! Run review use case - the four-phase pipeline
//!
//! Dispatch: fan out one analysis call per analyzer and wait for all of
//! them. Detect: pair up findings from different analyzers that describe
//! the same issue with differing severities. Debate: have the arbiter
//! settle each conflict in turn. Synthesize: fold everything into one
//! graded report.
//!
//! Phase 1 is all-or-nothing. A review missing an expert's perspective is
//! not a weaker review, it is a different review, so one analyzer failure
//! fails the run rather than producing a partial report.

use crate::config::ReviewParams;
use crate::ports::progress::{NoProgress, ProgressNotifier};
use crate::ports::reasoning::{GatewayError, ReasoningGateway};
use chrono::{DateTime, Utc};
use council_domain::{
    detector, parse_analysis_response, parse_resolution_response, synthesize, Analysis, Conflict,
    DocumentSnapshot, DomainError, Finding, Model, PromptTemplate, Report, Resolution, Roster,
};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::task::JoinSet;
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Pipeline phase, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Dispatch,
    Detect,
    Debate,
    Synthesize,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Dispatch => "dispatch",
            Phase::Detect => "detect",
            Phase::Debate => "debate",
            Phase::Synthesize => "synthesize",
        }
    }

    /// Human-readable label for progress output
    pub fn label(&self) -> &'static str {
        match self {
            Phase::Dispatch => "Independent analysis",
            Phase::Detect => "Conflict detection",
            Phase::Debate => "Debate",
            Phase::Synthesize => "Synthesis",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Errors that can terminate a review run
#[derive(Error, Debug)]
pub enum RunReviewError {
    #[error("No analyzers on the roster")]
    NoAnalyzers,

    #[error("Analyzer '{analyzer}' failed: {source}")]
    AnalyzerFailure {
        analyzer: String,
        #[source]
        source: GatewayError,
    },

    #[error("Invalid response from '{component}': {source}")]
    ValidationFailure {
        component: String,
        #[source]
        source: DomainError,
    },

    #[error("Debate failed for conflict [{conflict}]: {source}")]
    ConflictResolutionFailure {
        conflict: String,
        #[source]
        source: GatewayError,
    },

    #[error("Review cancelled")]
    Cancelled,
}

/// Everything needed to start one review run
#[derive(Debug, Clone)]
pub struct RunReviewInput {
    pub document: DocumentSnapshot,
    /// Review guidelines embedded verbatim into every prompt
    pub context: String,
    pub roster: Roster,
    /// Model that arbitrates debates
    pub arbiter: Model,
    pub params: ReviewParams,
}

impl RunReviewInput {
    pub fn new(document: DocumentSnapshot, context: impl Into<String>, roster: Roster) -> Self {
        Self {
            document,
            context: context.into(),
            roster,
            arbiter: Model::ClaudeOpus45,
            params: ReviewParams::default(),
        }
    }

    pub fn with_arbiter(mut self, model: Model) -> Self {
        self.arbiter = model;
        self
    }

    pub fn with_params(mut self, params: ReviewParams) -> Self {
        self.params = params;
        self
    }
}

/// Complete record of one finished review run.
///
/// The report is what callers usually want; the rest is the audit trail
/// (what each analyzer said, which conflicts arose, how each debate went).
#[derive(Debug, Clone, Serialize)]
pub struct ReviewRun {
    pub document: String,
    /// Review guidelines the run was executed against
    pub context: String,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
    pub analyses: Vec<Analysis>,
    pub conflicts: Vec<Conflict>,
    pub resolutions: Vec<Resolution>,
    pub report: Report,
}

/// Outcome of one dispatched analyzer task
enum DispatchOutcome {
    Ok(Analysis),
    Gateway(GatewayError),
    Validation(DomainError),
}

/// Use case that runs the full review pipeline
pub struct RunReviewUseCase<G: ReasoningGateway + 'static> {
    gateway: Arc<G>,
}

impl<G: ReasoningGateway + 'static> RunReviewUseCase<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }

    /// Run the pipeline without progress reporting or external cancellation
    pub async fn execute(&self, input: RunReviewInput) -> Result<ReviewRun, RunReviewError> {
        self.execute_with_progress(input, &NoProgress, CancellationToken::new())
            .await
    }

    /// Run the pipeline, reporting progress and honoring the cancellation
    /// token between and during backend calls.
    pub async fn execute_with_progress(
        &self,
        input: RunReviewInput,
        progress: &dyn ProgressNotifier,
        cancel: CancellationToken,
    ) -> Result<ReviewRun, RunReviewError> {
        if input.roster.is_empty() {
            return Err(RunReviewError::NoAnalyzers);
        }
        if cancel.is_cancelled() {
            return Err(RunReviewError::Cancelled);
        }

        let started_at = Utc::now();
        info!(
            document = %input.document.name(),
            analyzers = input.roster.len(),
            "Starting review run"
        );

        // Phase 1: dispatch
        let analyses = self.dispatch(&input, progress, &cancel).await?;

        // Phase 2: detect
        progress.on_phase_start(&Phase::Detect, 1);
        let findings: Vec<Finding> = analyses
            .iter()
            .flat_map(|a| a.findings.iter().cloned())
            .collect();
        let conflicts = detector::detect(&findings);
        info!(
            findings = findings.len(),
            conflicts = conflicts.len(),
            "Conflict detection complete"
        );
        progress.on_phase_complete(&Phase::Detect);

        // Phase 3: debate
        let resolutions = self.debate(&input, &conflicts, progress, &cancel).await?;

        // Phase 4: synthesize
        progress.on_phase_start(&Phase::Synthesize, 1);
        let report = synthesize(input.document.name(), &input.roster, &analyses, &resolutions);
        info!(
            issues = report.final_issues.len(),
            score = report.overall_score,
            grade = %report.overall_grade,
            "Review run complete"
        );
        progress.on_phase_complete(&Phase::Synthesize);

        Ok(ReviewRun {
            document: input.document.name().to_string(),
            context: input.context.clone(),
            started_at,
            completed_at: Utc::now(),
            analyses,
            conflicts,
            resolutions,
            report,
        })
    }

    /// Phase 1: one concurrent analysis call per analyzer.
    ///
    /// Results come back in completion order; they are re-ordered to roster
    /// order so the rest of the pipeline is deterministic.
    async fn dispatch(
        &self,
        input: &RunReviewInput,
        progress: &dyn ProgressNotifier,
        cancel: &CancellationToken,
    ) -> Result<Vec<Analysis>, RunReviewError> {
        progress.on_phase_start(&Phase::Dispatch, input.roster.len());

        let mut join_set = JoinSet::new();
        for analyzer in input.roster.iter() {
            let gateway = Arc::clone(&self.gateway);
            let name = analyzer.name().to_string();
            let model = analyzer.model().clone();
            let system = PromptTemplate::analysis_system(analyzer);
            let prompt = PromptTemplate::analysis_prompt(&input.document, &input.context);
            let call_timeout = input.params.call_timeout;

            join_set.spawn(async move {
                debug!(analyzer = %name, model = %model, "Dispatching analysis");
                let outcome =
                    match timeout(call_timeout, gateway.complete(&model, &system, &prompt)).await {
                        Ok(Ok(raw)) => match parse_analysis_response(&name, &raw) {
                            Ok(analysis) => DispatchOutcome::Ok(analysis),
                            Err(e) => DispatchOutcome::Validation(e),
                        },
                        Ok(Err(e)) => DispatchOutcome::Gateway(e),
                        Err(_) => DispatchOutcome::Gateway(GatewayError::Timeout),
                    };
                (name, outcome)
            });
        }

        let mut by_name: HashMap<String, Analysis> = HashMap::new();
        loop {
            let joined = tokio::select! {
                _ = cancel.cancelled() => {
                    join_set.abort_all();
                    return Err(RunReviewError::Cancelled);
                }
                joined = join_set.join_next() => joined,
            };

            let Some(joined) = joined else {
                break;
            };

            match joined {
                Ok((name, DispatchOutcome::Ok(analysis))) => {
                    debug!(
                        analyzer = %name,
                        score = analysis.score,
                        findings = analysis.findings.len(),
                        "Analysis received"
                    );
                    progress.on_task_complete(&Phase::Dispatch, &name, true);
                    by_name.insert(name, analysis);
                }
                Ok((name, DispatchOutcome::Gateway(e))) => {
                    warn!(analyzer = %name, error = %e, "Analyzer call failed, aborting run");
                    progress.on_task_complete(&Phase::Dispatch, &name, false);
                    join_set.abort_all();
                    return Err(RunReviewError::AnalyzerFailure {
                        analyzer: name,
                        source: e,
                    });
                }
                Ok((name, DispatchOutcome::Validation(e))) => {
                    warn!(analyzer = %name, error = %e, "Analyzer response invalid, aborting run");
                    progress.on_task_complete(&Phase::Dispatch, &name, false);
                    join_set.abort_all();
                    return Err(RunReviewError::ValidationFailure {
                        component: name,
                        source: e,
                    });
                }
                Err(e) if e.is_cancelled() => continue,
                Err(e) => {
                    join_set.abort_all();
                    return Err(RunReviewError::AnalyzerFailure {
                        analyzer: "unknown".to_string(),
                        source: GatewayError::Other(format!("task join error: {e}")),
                    });
                }
            }
        }

        progress.on_phase_complete(&Phase::Dispatch);

        // Roster order, not completion order
        let mut analyses = Vec::with_capacity(input.roster.len());
        for analyzer in input.roster.iter() {
            match by_name.remove(analyzer.name()) {
                Some(analysis) => analyses.push(analysis),
                None => {
                    return Err(RunReviewError::AnalyzerFailure {
                        analyzer: analyzer.name().to_string(),
                        source: GatewayError::Other("no result returned".to_string()),
                    })
                }
            }
        }
        Ok(analyses)
    }

    /// Phase 3: settle each conflict through the arbiter, one debate at a
    /// time so later debates could build on earlier outcomes.
    async fn debate(
        &self,
        input: &RunReviewInput,
        conflicts: &[Conflict],
        progress: &dyn ProgressNotifier,
        cancel: &CancellationToken,
    ) -> Result<Vec<Resolution>, RunReviewError> {
        progress.on_phase_start(&Phase::Debate, conflicts.len());

        let mut resolutions = Vec::with_capacity(conflicts.len());
        for conflict in conflicts {
            if cancel.is_cancelled() {
                return Err(RunReviewError::Cancelled);
            }

            let summary = conflict.summary();
            debug!(conflict = %summary, "Starting debate");
            let prompt = PromptTemplate::debate_prompt(conflict, &input.document, &input.context);
            let call = timeout(
                input.params.call_timeout,
                self.gateway
                    .complete(&input.arbiter, PromptTemplate::debate_system(), &prompt),
            );

            let raw = tokio::select! {
                _ = cancel.cancelled() => return Err(RunReviewError::Cancelled),
                result = call => match result {
                    Ok(Ok(raw)) => raw,
                    Ok(Err(e)) => {
                        progress.on_task_complete(&Phase::Debate, &summary, false);
                        return Err(RunReviewError::ConflictResolutionFailure {
                            conflict: summary,
                            source: e,
                        });
                    }
                    Err(_) => {
                        progress.on_task_complete(&Phase::Debate, &summary, false);
                        return Err(RunReviewError::ConflictResolutionFailure {
                            conflict: summary,
                            source: GatewayError::Timeout,
                        });
                    }
                },
            };

            let resolution = parse_resolution_response(conflict.clone(), &raw).map_err(|e| {
                RunReviewError::ValidationFailure {
                    component: "arbiter".to_string(),
                    source: e,
                }
            })?;
            debug!(
                conflict = %summary,
                severity = %resolution.severity,
                confidence = resolution.confidence,
                "Debate resolved"
            );
            progress.on_task_complete(&Phase::Debate, &summary, true);
            resolutions.push(resolution);
        }

        progress.on_phase_complete(&Phase::Debate);
        Ok(resolutions)
    }
}
