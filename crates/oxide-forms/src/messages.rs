//! Stock validation messages.

/// Shown when a text-like field is left empty.
pub const REQUIRED_INPUT: &str = "入力してください";

/// Shown when no option of a select-like field is chosen.
pub const REQUIRED_SELECT: &str = "選択してください";
