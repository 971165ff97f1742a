mod audit_vm;
mod stats_vm;
mod time_fmt;

pub use audit_vm::{AgeChipVm, AuditIntent, AuditVm, PersonToggleVm, SkillPromptVm, dispatch_intent};
pub use stats_vm::{ChapterRowVm, PersonCountVm, StatsVm, map_chapter_rows};
