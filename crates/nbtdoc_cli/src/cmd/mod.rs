/// Format conversion command.
pub mod convert;
/// File-level information command.
pub mod info;
/// New document command.
pub mod new;
/// Tree dump command.
pub mod print;
