mod build;
mod interaction;
mod pulse;
mod view;

pub(super) use self::pulse::CenterPulse;
