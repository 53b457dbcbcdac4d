//! Mapping validation engine
//!
//! Checks a mapping set against an immutable snapshot of the current
//! field catalog and target schema. The continuous wrapper re-runs
//! validation with latest-wins semantics: every pass carries a
//! generation stamp, and a pass delivers its report only if no newer
//! pass was started in the meantime.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Instant;

use tracing::{debug, info};

use crate::extraction::{Field, flatten};

use super::compatibility::{CompatibilityLevel, CompatibilityPolicy, CompatibilityResult};
use super::types::{
    DatabaseColumn, FieldMapping, FixAdvisory, MappingStatus, MappingValidation, TargetSchema,
    ValidationReport, ValidationSummary,
};

/// Validates mapping sets against a field catalog and a target schema
#[derive(Debug, Clone, Default)]
pub struct MappingValidator {
    policy: CompatibilityPolicy,
}

impl MappingValidator {
    /// Create a validator with the default compatibility policy
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a validator with a custom compatibility policy
    pub fn with_policy(policy: CompatibilityPolicy) -> Self {
        Self { policy }
    }

    /// Validate every mapping against one snapshot of catalog and schema
    ///
    /// Source fields resolve by their unique catalog name, target columns
    /// by schema column name. A mapping whose references no longer resolve
    /// is reported as missing; otherwise the classifier verdict decides
    /// between compatible, warning and error.
    pub fn validate(
        &self,
        mappings: &[FieldMapping],
        catalog: &[Field],
        schema: &TargetSchema,
    ) -> Vec<MappingValidation> {
        let fields: HashMap<&str, &Field> = flatten(catalog)
            .into_iter()
            .map(|field| (field.name.as_str(), field))
            .collect();

        mappings
            .iter()
            .map(|mapping| self.validate_one(mapping, &fields, schema))
            .collect()
    }

    fn validate_one(
        &self,
        mapping: &FieldMapping,
        fields: &HashMap<&str, &Field>,
        schema: &TargetSchema,
    ) -> MappingValidation {
        let mut missing_fields = Vec::new();
        let mut type_mismatches = Vec::new();

        let source = fields.get(mapping.source_field.name.as_str()).copied();
        let target = schema.column(&mapping.target_field.name);

        if source.is_none() {
            missing_fields.push(mapping.source_field.name.clone());
        }
        if target.is_none() {
            missing_fields.push(mapping.target_field.name.clone());
        }

        let mut status = MappingStatus::Compatible;
        if !missing_fields.is_empty() {
            status = MappingStatus::Missing;
        } else if let (Some(field), Some(column)) = (source, target) {
            let verdict = self.policy.classify(field.field_type, &column.column_type);
            if verdict.level != CompatibilityLevel::Compatible {
                type_mismatches.push(mismatch_message(field, column, &verdict));
                status = verdict.level.into();
            }
        }

        MappingValidation {
            mapping: mapping.clone(),
            missing_fields,
            type_mismatches,
            status,
        }
    }
}

fn mismatch_message(
    field: &Field,
    column: &DatabaseColumn,
    verdict: &CompatibilityResult,
) -> String {
    let advice = verdict
        .suggestions
        .first()
        .map(String::as_str)
        .unwrap_or("types do not line up");
    format!(
        "{} ({}) -> {} ({}): {}",
        field.name, field.field_type, column.name, column.column_type, advice
    )
}

/// Delivery outcome of a completed validation pass
#[derive(Debug, Clone)]
pub enum PassOutcome {
    /// Pass was still the latest; its report was stored and returned
    Completed(Arc<ValidationReport>),
    /// A newer pass was started meanwhile; the report was discarded
    Superseded,
}

impl PassOutcome {
    /// The delivered report, if this pass was not superseded
    pub fn report(&self) -> Option<&ValidationReport> {
        match self {
            PassOutcome::Completed(report) => Some(report),
            PassOutcome::Superseded => None,
        }
    }

    /// Check whether the pass was superseded
    pub fn is_superseded(&self) -> bool {
        matches!(self, PassOutcome::Superseded)
    }
}

/// Continuously re-validates a mapping set with latest-wins passes
///
/// Each pass is stamped with a monotonically increasing generation at
/// start. On completion the stamp is compared with the newest issued
/// one: only a still-latest pass stores and delivers its report, so
/// observers never see a superseded result. Passes run over immutable
/// snapshots, which keeps the whole cycle lock-free apart from the
/// report slot itself.
#[derive(Debug, Default)]
pub struct ContinuousValidator {
    validator: MappingValidator,
    generation: AtomicU64,
    latest: Mutex<Option<Arc<ValidationReport>>>,
}

impl ContinuousValidator {
    /// Create a continuous validator with the default policy
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a continuous validator around a configured validator
    pub fn with_validator(validator: MappingValidator) -> Self {
        Self {
            validator,
            generation: AtomicU64::new(0),
            latest: Mutex::new(None),
        }
    }

    /// Stamp and start a new validation pass
    ///
    /// Starting a pass immediately supersedes any pass still in flight;
    /// the older pass will observe that when it tries to complete.
    pub fn begin_pass(&self) -> ValidationPass<'_> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(generation, "Validation pass started");
        ValidationPass {
            owner: self,
            generation,
        }
    }

    /// Run a full pass synchronously: stamp, compute, complete
    pub fn validate_now(
        &self,
        mappings: &[FieldMapping],
        catalog: &[Field],
        schema: &TargetSchema,
    ) -> PassOutcome {
        let pass = self.begin_pass();
        let report = pass.run(mappings, catalog, schema);
        pass.complete(report)
    }

    /// Most recently delivered report, if any pass has completed
    pub fn latest(&self) -> Option<Arc<ValidationReport>> {
        self.latest_slot().clone()
    }

    /// Generation stamp of the most recently started pass
    pub fn current_generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Forward a remediation suggestion for one mapping
    ///
    /// Advisory only: engine state, stored reports and the mapping set
    /// stay untouched.
    pub fn fix_advisory(
        &self,
        mapping_id: impl Into<String>,
        fix: impl Into<String>,
    ) -> FixAdvisory {
        let advisory = FixAdvisory {
            mapping_id: mapping_id.into(),
            suggestion: fix.into(),
        };
        debug!(mapping = %advisory.mapping_id, "Forwarding fix advisory");
        advisory
    }

    fn latest_slot(&self) -> MutexGuard<'_, Option<Arc<ValidationReport>>> {
        // A poisoned lock still holds a structurally valid slot; keep using it.
        match self.latest.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

/// Handle for one stamped validation pass
#[must_use]
pub struct ValidationPass<'a> {
    owner: &'a ContinuousValidator,
    generation: u64,
}

impl ValidationPass<'_> {
    /// Generation stamp of this pass
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Compute this pass's report over one snapshot of the inputs
    pub fn run(
        &self,
        mappings: &[FieldMapping],
        catalog: &[Field],
        schema: &TargetSchema,
    ) -> ValidationReport {
        let started = Instant::now();
        let results = self.owner.validator.validate(mappings, catalog, schema);
        let summary = ValidationSummary::new(&results);
        ValidationReport {
            generation: self.generation,
            results,
            summary,
            duration_ms: started.elapsed().as_millis() as u64,
        }
    }

    /// Deliver the report if this pass is still the latest
    pub fn complete(self, report: ValidationReport) -> PassOutcome {
        let mut slot = self.owner.latest_slot();
        if self.owner.generation.load(Ordering::SeqCst) != self.generation {
            debug!(
                generation = self.generation,
                "Validation pass superseded, result discarded"
            );
            return PassOutcome::Superseded;
        }
        let report = Arc::new(report);
        *slot = Some(Arc::clone(&report));
        info!(
            generation = self.generation,
            mappings = report.summary.total,
            "Validation pass complete"
        );
        PassOutcome::Completed(report)
    }
}
