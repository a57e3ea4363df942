/// User-facing method identifier taken from the dataset's label column.
/// Example: `Journey mapping`
pub type MethodLabel = String;
/// One alternate phrasing of a method label.
/// Examples: `Map the customer path`, `Trace each touchpoint`
pub type Alternative = String;
/// Identifier for the source that produced a dataset.
/// Examples: `sheet`, `local_file`, `fixture`
pub type SourceId = String;
/// Raw column name as it appears in the upstream payload.
/// Examples: `Method`, `Alt 1`, `alternative_3`
pub type ColumnName = String;
/// Human-readable topic title.
/// Examples: `Untitled`, `Journey one`
pub type TopicTitle = String;
/// Position of a method within the sampled sequence of the current derivation.
pub type MethodSlot = usize;
