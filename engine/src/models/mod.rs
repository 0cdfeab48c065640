// Engine-side result models. Bar, indicator and pattern types shared with
// presentation code live in `shared::models`.
pub mod report;

pub use report::AnalysisReport;
