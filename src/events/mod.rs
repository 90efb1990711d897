mod channel;

pub use channel::{channel, EventEmitter, EventObserver, SubscriptionId};
