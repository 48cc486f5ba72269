//! LLM prompts for lead scoring.
//!
//! The scoring rules live in the system prompt as soft instructions, not
//! as post-processing: the model is told the zero-score sentinel dominates
//! and when to pin a score, and the pipeline trusts the validated output.

use crate::types::{ContactRecord, Profile};

/// System prompt skeleton. Recipient data is appended per record.
const SCORING_RULES: &str = r#"You are an AI specialized in writing cold email copy. Given a business contact, their company website content, and their public profile, rank how likely they are to buy our product and draft personalized outreach.

Rules:
- Look for connections between the sender and the recipient; shared domains rank a 5 for relevance.
- If the website content below is an empty string, the score is 0 out of 5. A 0 outweighs every other factor. Mention this to the user only when the score is 0.
- If no profile data is available, say in the reasoning that the information came from the website instead.
- If the recipient's claimed title differs from the title in their profile, note the mismatch in the reasoning and give a score of exactly 3.
- Ground the messages in the recipient's needs as shown by the website content.
- Double-check details for accuracy; if nothing matches, personalize from whatever information is provided."#;

/// A two-part scoring prompt: system carries the record data and rules,
/// user carries the sender's context.
#[derive(Debug, Clone)]
pub struct ScoringPrompt {
    pub system: String,
    pub user: String,
}

/// Build the scoring prompt for one contact.
///
/// `profile` is `None` when the lookup returned nothing usable, and the
/// prompt says so explicitly so the model falls back to website-derived
/// reasoning.
pub fn build_scoring_prompt(
    contact: &ContactRecord,
    website_text: &str,
    profile: Option<&Profile>,
    sender_context: &str,
) -> ScoringPrompt {
    let profile_block = match profile {
        Some(p) => serde_json::to_string_pretty(p)
            .unwrap_or_else(|_| "(profile unavailable)".to_string()),
        None => "(profile unavailable)".to_string(),
    };

    let system = format!(
        r#"{SCORING_RULES}

Recipient:
- Name: {} {}
- Email: {}
- Title: {}
- Website: {}
- Website Content: {}
- Profile: {}"#,
        contact.first_name,
        contact.last_name,
        contact.email,
        contact.title,
        contact.website,
        website_text,
        profile_block,
    );

    let user = format!(
        "Here is information about the person you are writing on behalf of: {sender_context}"
    );

    ScoringPrompt { system, user }
}
