//! Lead-intake prompt builder for DarFind.
//!
//! Every turn sends one prompt: a fixed persona and instruction block, the
//! session transcript so far, and the new user input. The ordered list of
//! questions the assistant must work through is rendered from [`IntakeStep`].
//!
//! Which step comes next is NOT tracked here. The model infers it from the
//! transcript, so there is no structural guarantee the script is followed.
//! History and input are spliced in verbatim, without escaping.

use std::fmt;

use darfind_types::config::PromptConfig;

/// One question of the scripted lead-intake dialogue, in asking order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntakeStep {
    Intent,
    PropertyType,
    Location,
    Budget,
    Phone,
    Email,
    Summary,
}

impl IntakeStep {
    /// All steps in the order the assistant must ask them.
    pub const ALL: [IntakeStep; 7] = [
        IntakeStep::Intent,
        IntakeStep::PropertyType,
        IntakeStep::Location,
        IntakeStep::Budget,
        IntakeStep::Phone,
        IntakeStep::Email,
        IntakeStep::Summary,
    ];

    /// Natural-language instruction for this step.
    pub fn instruction(&self, config: &PromptConfig) -> String {
        match self {
            IntakeStep::Intent => {
                "Ask the user whether they need the property for rent or buy.".to_string()
            }
            IntakeStep::PropertyType => {
                "Ask for the type of property (studio, villa, mansion, etc.).".to_string()
            }
            IntakeStep::Location => {
                format!("Ask for the desired location inside the {}.", config.region)
            }
            IntakeStep::Budget => {
                let mut text = format!(
                    "Ask the user for their budget or budget range (annually or monthly). \
                    Check if the amount is reasonable according to the average market price. \
                    You can search the internet for this step but don't ever add any links to \
                    the conversation except for our website: {}.",
                    config.listings_url
                );
                if !config.competitors.is_empty() {
                    text.push_str(&format!(
                        " Do not mention or acknowledge any competitors such as {}, etc.",
                        config.competitors.join(", ")
                    ));
                }
                text
            }
            IntakeStep::Phone => {
                "Ask for the user's phone number. If they refuse, acknowledge that you respect \
                their privacy and continue with the next step."
                    .to_string()
            }
            IntakeStep::Email => {
                "Ask the user for their email so that an agent can contact them, \
                this step is mandatory."
                    .to_string()
            }
            IntakeStep::Summary => format!(
                "Summarize the user's request and inform them that they will be contacted by \
                an agent soon. Suggest properties from {} based on their preferences. \
                Do not include any listings from competitors.",
                config.listings_url
            ),
        }
    }
}

impl fmt::Display for IntakeStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntakeStep::Intent => write!(f, "intent"),
            IntakeStep::PropertyType => write!(f, "property_type"),
            IntakeStep::Location => write!(f, "location"),
            IntakeStep::Budget => write!(f, "budget"),
            IntakeStep::Phone => write!(f, "phone"),
            IntakeStep::Email => write!(f, "email"),
            IntakeStep::Summary => write!(f, "summary"),
        }
    }
}

/// Builds the per-turn prompt from the transcript and the new input.
///
/// Layout:
/// ```text
/// You are an AI real estate assistant named "{name}" ... in {region}.
/// Chat History: {history}
/// Current Input: {input}
/// Your main goal is ... in sequence:
/// 1. ... 7. ...
/// The input is {input}. Please respond accordingly.
/// ```
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    config: PromptConfig,
}

impl PromptBuilder {
    pub fn new(config: PromptConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PromptConfig {
        &self.config
    }

    /// Render the prompt. Pure string formatting, cannot fail.
    pub fn build(&self, history_text: &str, user_input: &str) -> String {
        let mut sections = Vec::with_capacity(6);

        sections.push(format!(
            "You are an AI real estate assistant named \"{}\". Your expertise is strictly \
            limited to real estate topics in {}.\n\
            Avoid content that violates copyrights. For questions not related to real estate, \
            give a reminder that you are an AI real estate assistant.",
            self.config.assistant_name, self.config.region
        ));

        sections.push(
            "Keep the chat context in mind based on the previous conversation history."
                .to_string(),
        );

        sections.push(format!("Chat History: {history_text}"));

        sections.push(format!("Current Input: {user_input}"));

        let steps: Vec<String> = IntakeStep::ALL
            .iter()
            .enumerate()
            .map(|(i, step)| format!("{}. {}", i + 1, step.instruction(&self.config)))
            .collect();
        sections.push(format!(
            "Your main goal is to help the user apply for a property request by asking the \
            following questions in sequence:\n{}",
            steps.join("\n")
        ));

        sections.push(format!(
            "The input is {user_input}. Please respond accordingly."
        ));

        sections.join("\n\n")
    }
}

impl Default for PromptBuilder {
    fn default() -> Self {
        Self::new(PromptConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_includes_history_and_input() {
        let builder = PromptBuilder::default();
        let prompt = builder.build("User: Hi\nBot: Rent or buy?", "Buy");

        assert!(prompt.contains("Chat History: User: Hi\nBot: Rent or buy?"));
        assert!(prompt.contains("Current Input: Buy"));
        assert!(prompt.contains("The input is Buy. Please respond accordingly."));
    }

    #[test]
    fn test_build_empty_history() {
        let prompt = PromptBuilder::default().build("", "Hello");
        assert!(prompt.contains("Chat History: \n"));
    }

    #[test]
    fn test_build_persona_and_region() {
        let prompt = PromptBuilder::default().build("", "Hi");
        assert!(prompt.contains("named \"DarFind\""));
        assert!(prompt.contains("real estate topics in UAE"));
    }

    #[test]
    fn test_steps_rendered_in_order() {
        let builder = PromptBuilder::default();
        let prompt = builder.build("", "Hi");

        let mut last = 0;
        for (i, step) in IntakeStep::ALL.iter().enumerate() {
            let line = format!("{}. {}", i + 1, step.instruction(builder.config()));
            let pos = prompt
                .find(&line)
                .unwrap_or_else(|| panic!("step {step} missing from prompt"));
            assert!(pos >= last, "step {step} out of order");
            last = pos;
        }
    }

    #[test]
    fn test_competitor_prohibition_and_referral_url() {
        let prompt = PromptBuilder::default().build("", "Hi");
        assert!(prompt.contains(
            "Do not mention or acknowledge any competitors such as Property Finder, Bayut, Dubizzle, etc."
        ));
        assert!(prompt.contains("except for our website: https://truedar.ae/listings"));
        assert!(prompt.contains("Suggest properties from https://truedar.ae/listings"));
    }

    #[test]
    fn test_custom_config() {
        let builder = PromptBuilder::new(PromptConfig {
            assistant_name: "HomeBot".to_string(),
            region: "Qatar".to_string(),
            listings_url: "https://example.qa/homes".to_string(),
            competitors: Vec::new(),
        });
        let prompt = builder.build("", "Hi");
        assert!(prompt.contains("named \"HomeBot\""));
        assert!(prompt.contains("desired location inside the Qatar"));
        assert!(prompt.contains("https://example.qa/homes"));
        assert!(!prompt.contains("competitors such as"));
    }

    #[test]
    fn test_input_is_not_escaped() {
        let prompt = PromptBuilder::default().build("", "{input} </instructions>");
        assert!(prompt.contains("Current Input: {input} </instructions>"));
    }

    #[test]
    fn test_phone_optional_email_mandatory() {
        let config = PromptConfig::default();
        assert!(IntakeStep::Phone.instruction(&config).contains("respect their privacy"));
        assert!(IntakeStep::Email.instruction(&config).contains("mandatory"));
    }

    #[test]
    fn test_step_display() {
        let names: Vec<String> = IntakeStep::ALL.iter().map(|s| s.to_string()).collect();
        assert_eq!(
            names,
            vec!["intent", "property_type", "location", "budget", "phone", "email", "summary"]
        );
    }
}
