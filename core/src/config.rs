use skill::{SkillOptions, MAX_RATING, MIN_RATING};
use std::str::FromStr;
use uci::{UciOption, UciOptionType, UciOutput};

macro_rules! define_config {
    ($(($field:ident: $type:ty, $uci_name:literal, $uci_type:expr, $default:expr)),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub struct EngineConfig {
            $(pub $field: ConfigParam<$type>,)*
        }

        impl Default for EngineConfig {
            fn default() -> Self {
                Self {
                    $($field: ConfigParam {
                        value: $default,
                        uci: UciOption { name: $uci_name, option_type: $uci_type },
                    },)*
                }
            }
        }

        impl EngineConfig {
            /// Option names match regardless of case, as UCI requires.
            pub fn update_from_uci(&mut self, uci_name: &str, value: &str) -> Result<(), String> {
                $(if uci_name.eq_ignore_ascii_case($uci_name) {
                    return self.$field.update_from_uci(value);
                })*
                Err(format!("Unknown parameter: {}", uci_name))
            }

            pub fn to_uci(&self, output: &std::sync::mpsc::Sender<UciOutput>) -> Result<(), std::sync::mpsc::SendError<UciOutput>> {
                $(output.send(UciOutput::Option(self.$field.to_uci()))?;)*
                Ok(())
            }
        }
    };
}

define_config!(
    (limit_strength: bool, "UCI_LimitStrength", UciOptionType::Check, false),
    (elo: i32, "UCI_Elo", UciOptionType::Spin { min: MIN_RATING, max: MAX_RATING }, MIN_RATING),
    (simulate_blunders: bool, "Simulate Human Blunders", UciOptionType::Check, false),
    // Accepted and reported; there is no search to limit
    (handicapped_depth: bool, "Handicapped Depth", UciOptionType::Check, false),
    (avatar_file: String, "Avatar File", UciOptionType::String, String::new()),
);

impl EngineConfig {
    pub fn skill_options(&self) -> SkillOptions {
        SkillOptions {
            limit_strength: self.limit_strength.value,
            elo: self.elo.value,
            simulate_blunders: self.simulate_blunders.value,
            handicapped_depth: self.handicapped_depth.value,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigParam<T> {
    pub value: T,
    pub uci: UciOption,
}

impl<T> ConfigParam<T>
where
    T: FromStr + ToString + Clone,
    T::Err: std::fmt::Display,
{
    pub fn update_from_uci(&mut self, value: &str) -> Result<(), String> {
        let option_type = &self.uci.option_type;
        option_type.validate(value)?;

        let new_value = option_type
            .normalize(value)
            .parse::<T>()
            .map_err(|e| format!("Parse error: {}", e))?;

        self.value = new_value;
        Ok(())
    }

    pub fn to_uci(&self) -> String {
        self.uci.option_type.to_uci(self.uci.name, &self.value)
    }
}
