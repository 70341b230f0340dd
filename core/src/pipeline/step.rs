// core/src/pipeline/step.rs

/// A named slot in a pipeline. Handlers attach to it by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepDef {
  pub name: String,
  /// An optional step without handlers is skipped instead of failing the run.
  pub optional: bool,
}
