//! Fixed text the chat page sends or shows on the user's behalf.

/// Example prompts rotated through the input's placeholder.
pub const PLACEHOLDER_EXAMPLES: [&str; 3] = [
    "For example: Read my gmail inbox, find all questions from investors, check slack's #general channel and prepare answers as email drafts",
    "For example: Open my linkedin and find all people who mention AI in their profile. Give me a list sorted by mutual connections",
    "For example: Analyze my calendar for next week and suggest optimal meeting times for a 2-hour workshop",
];

/// Prompts offered by the empty-chat surface.
pub const SUGGESTED_PROMPTS: [&str; 4] = [
    "Summarize the unread messages in my inbox",
    "What meetings do I have tomorrow?",
    "Find the latest files I changed and describe what changed",
    "Draft a status update from this week's commits",
];

/// The tools left enabled when a message is sent with too many tools active.
pub const META_TOOLS: [&str; 3] = [
    "archestra__list_available_tools",
    "archestra__enable_tools",
    "archestra__disable_tools",
];

const TOOL_RESTRICTION_PREAMBLE: &str = "You currently have only list_available_tools and enable_tools enabled. Follow these steps:
1. Call list_available_tools to see all available tool IDs
2. Call enable_tools with the specific tool IDs you need, for example: {\"toolIds\": [\"filesystem__read_file\", \"filesystem__write_file\"]}
3. After enabling the necessary tools, disable Archestra tools using disable_tools.
4. After, proceed with this task: \n\n";

const SUMMARIZATION_PREAMBLE: &str =
    "Please provide a concise summary of the following conversation to use as context moving forward:\n\n---\n\n";

/// Wraps `task` in instructions that make the agent pick its own tools first.
///
/// The task is appended verbatim.
pub fn tool_restricted_message(task: &str) -> String {
    format!("{TOOL_RESTRICTION_PREAMBLE}{task}")
}

/// Wraps a flattened conversation in a request to summarize it.
pub fn summarization_request(conversation: &str) -> String {
    format!("{SUMMARIZATION_PREAMBLE}{conversation}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tool_restricted_message_keeps_task_verbatim() {
        let task = "  Book a flight\nto Lisbon  ";
        let message = tool_restricted_message(task);
        assert!(message.starts_with("You currently have only list_available_tools"));
        assert!(message.contains("1. Call list_available_tools"));
        assert!(message.contains("2. Call enable_tools"));
        assert!(message.contains("3. After enabling the necessary tools"));
        assert!(message.ends_with(&format!("proceed with this task: \n\n{task}")));
    }

    #[test]
    fn summarization_request_separates_conversation() {
        let request = summarization_request("user: hi\nagent: hello");
        assert_eq!(
            request,
            "Please provide a concise summary of the following conversation to use as context moving forward:\n\n---\n\nuser: hi\nagent: hello"
        );
    }
}
