//! Motivational copy for streak milestones.

use super::engine::StreakKind;

const FIRST_TIME: &str = "You've logged meals today!\nKeep it up to develop a streak!";
const ALREADY_LOGGED: &str = "Already logged today. See you tomorrow!";
const FALLBACK: &str = "Keep it up!";

/// Milestone line for streaks 2 through 10.
fn milestone(streak: u32) -> Option<&'static str> {
    match streak {
        2 => Some("You're getting into a rhythm! 💪"),
        3 => Some("3 days strong! Small steps, big results. 💪"),
        4 => Some("Consistency is your superpower. ⚡"),
        5 => Some("Halfway to 10! You're doing amazing. ✨"),
        6 => Some("You're on fire! 🔥 Don't break the streak!"),
        7 => Some("This habit is sticking — nice work!"),
        8 => Some("You're proving what dedication looks like."),
        9 => Some("One day at a time. You're building something great. 💪"),
        10 => Some("10 days strong! Incredible dedication! 🎉"),
        _ => None,
    }
}

/// Build the user-facing streak line.
///
/// The idempotent path gets its own copy and never consults the milestone
/// table; a streak of 1 (started or reset) gets the first-time variant.
pub(super) fn message_for(streak: u32, kind: StreakKind) -> String {
    let motivation = match kind {
        StreakKind::AlreadyLogged => ALREADY_LOGGED,
        _ if streak == 1 => FIRST_TIME,
        _ => milestone(streak).unwrap_or(FALLBACK),
    };
    format!("Streak: {streak} \n{motivation}")
}
