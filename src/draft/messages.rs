//! Text sent to participants over their connection.

/// Sent right after a participant joins.
pub const WELCOME: &str = "Welcome to the Football draft. Waiting on both participants to join";

/// Sent once both seats are filled.
pub const BEGIN: &str = "Let's Begin!";

/// Sent once when a handler observes the draft has finished.
pub const DRAFT_COMPLETE: &str = "Draft complete! Game over.";

/// Reply to a message received while the participant is not on the clock.
pub const WAIT_FOR_TURN: &str = "Please wait for your turn.";

/// Sent to connected participants when the server stops.
pub const SHUTTING_DOWN: &str = "Server shutting down.";

/// Prompt offered to the participant on the clock.
#[must_use]
pub fn turn_prompt(round: u32, option: &str) -> String {
    format!("It is round: {round} and it is your turn. your randomized team is: {option}. Who do you choose?")
}

/// Notice that the turn timer ran out and the offered option was recorded.
#[must_use]
pub fn auto_pick(option: &str) -> String {
    format!("Time expired. {option} was drafted for you.")
}
