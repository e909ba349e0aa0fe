/// Placeholder GUIs use for an empty string option.
pub const EMPTY_STRING: &str = "<empty>";

#[derive(Debug, Clone)]
pub struct UciOption {
    pub name: &'static str,
    pub option_type: UciOptionType,
}

#[derive(Debug, Clone)]
pub enum UciOptionType {
    Spin { min: i32, max: i32 },
    Check,
    String,
}

impl UciOptionType {
    pub fn validate(&self, value: &str) -> Result<(), String> {
        match self {
            UciOptionType::Spin { min, max } => {
                let parsed = value
                    .parse::<i32>()
                    .map_err(|e| format!("Invalid integer: {}", e))?;
                if parsed < *min || parsed > *max {
                    return Err(format!("Value {} out of range [{}, {}]", parsed, min, max));
                }
                Ok(())
            }
            UciOptionType::Check => match value.to_lowercase().as_str() {
                "true" | "false" => Ok(()),
                _ => Err("Boolean value must be 'true' or 'false'".to_string()),
            },
            UciOptionType::String => Ok(()),
        }
    }

    /// Maps a raw `setoption` value to the text the option type parses.
    pub fn normalize(&self, value: &str) -> String {
        match self {
            UciOptionType::Check => value.to_lowercase(),
            UciOptionType::String if value == EMPTY_STRING => String::new(),
            _ => value.to_string(),
        }
    }

    pub fn to_uci<T>(&self, name: &str, current_value: &T) -> String
    where
        T: ToString,
    {
        match self {
            UciOptionType::Spin { min, max } => {
                format!(
                    "option name {} type spin default {} min {} max {}",
                    name,
                    current_value.to_string(),
                    min,
                    max
                )
            }
            UciOptionType::Check => {
                format!(
                    "option name {} type check default {}",
                    name,
                    current_value.to_string()
                )
            }
            UciOptionType::String => {
                let value = current_value.to_string();
                format!(
                    "option name {} type string default {}",
                    name,
                    if value.is_empty() { EMPTY_STRING } else { value.as_str() }
                )
            }
        }
    }
}
