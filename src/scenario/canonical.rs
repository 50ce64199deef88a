//! The scenarios from the dangerous-property lesson.

use super::Scenario;

/// Set "Beyonce", announce, wait. The output names Beyonce.
#[must_use]
pub fn beyonce() -> Scenario {
    Scenario::new().set("Beyonce").announce().wait()
}

/// Set "Taylor Swift", announce, set "Kanye West", wait.
///
/// Either name is a valid outcome. Which one appears depends on when the
/// execution context runs the deferred read.
#[must_use]
pub fn taylor_then_kanye() -> Scenario {
    Scenario::new()
        .set("Taylor Swift")
        .announce()
        .set("Kanye West")
        .wait()
}

/// Both scenarios back to back, observing between them.
#[must_use]
pub fn dangerous_property_lesson() -> Scenario {
    beyonce().observe().then(taylor_then_kanye())
}

/// The names `taylor_then_kanye` may legitimately produce.
pub const TAYLOR_THEN_KANYE_OUTCOMES: [&str; 2] = ["Taylor Swift", "Kanye West"];
