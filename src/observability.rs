use biometrics::{Collector, Counter};

pub(crate) static PAGE_SUBMITS: Counter = Counter::new("chatpad.page.submits");
pub(crate) static PAGE_SUBMITS_RESTRICTED: Counter =
    Counter::new("chatpad.page.submits_tool_restricted");
pub(crate) static PAGE_PROMPT_SELECTS: Counter = Counter::new("chatpad.page.prompt_selects");
pub(crate) static PAGE_RERUNS: Counter = Counter::new("chatpad.page.reruns");
pub(crate) static PAGE_COMPACTIONS: Counter = Counter::new("chatpad.page.compactions");
pub(crate) static PAGE_CLEARS: Counter = Counter::new("chatpad.page.clears");

pub(crate) static INPUT_COMMANDS: Counter = Counter::new("chatpad.input.commands");
pub(crate) static INPUT_PLACEHOLDER_TICKS: Counter =
    Counter::new("chatpad.input.placeholder_ticks");

pub(crate) static DRAFTS_SAVED: Counter = Counter::new("chatpad.drafts.saved");
pub(crate) static DRAFTS_CLEARED: Counter = Counter::new("chatpad.drafts.cleared");
pub(crate) static DRAFTS_DEBOUNCE_FIRED: Counter = Counter::new("chatpad.drafts.debounce_fired");

/// Register this crate's biometrics with the provided collector.
pub fn register_biometrics(collector: Collector) {
    collector.register_counter(&PAGE_SUBMITS);
    collector.register_counter(&PAGE_SUBMITS_RESTRICTED);
    collector.register_counter(&PAGE_PROMPT_SELECTS);
    collector.register_counter(&PAGE_RERUNS);
    collector.register_counter(&PAGE_COMPACTIONS);
    collector.register_counter(&PAGE_CLEARS);

    collector.register_counter(&INPUT_COMMANDS);
    collector.register_counter(&INPUT_PLACEHOLDER_TICKS);

    collector.register_counter(&DRAFTS_SAVED);
    collector.register_counter(&DRAFTS_CLEARED);
    collector.register_counter(&DRAFTS_DEBOUNCE_FIRED);
}
