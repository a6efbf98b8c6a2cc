use serde_json::Value;

/// Read a settings value from the command line.
///
/// Valid JSON (numbers, booleans, arrays, `null`) is taken as-is; anything
/// else is a plain string, so `triclosan` and `"triclosan"` both work.
pub fn parse_setting_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

/// Join trailing words into one instruction.
pub fn join_instruction(words: &[String]) -> anyhow::Result<String> {
    let instruction = words.join(" ");
    if instruction.trim().is_empty() {
        anyhow::bail!("instruction must not be empty");
    }
    Ok(instruction)
}
