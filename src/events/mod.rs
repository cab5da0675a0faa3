//! In-process events for record changes and user notifications.
//!
//! The table publishes an event after every completed store operation and a
//! [`Notification`] for every outcome the user should see. Subscribers
//! recompute their derived view on record events and show notifications as
//! transient toasts.
//!
//! # Example
//!
//! ```ignore
//! let bus = EventBus::new();
//! let toasts = bus.subscribe(EventFilter::notifications());
//!
//! while let Ok(event) = toasts.try_recv() {
//!     if let LedgerEvent::Notification(n) = event {
//!         println!("[{:?}] {}", n.level, n.message);
//!     }
//! }
//! ```

mod bus;
mod types;

pub use bus::EventBus;
pub use types::{
    DropReason, EventBusConfig, EventFilter, EventHandle, LedgerEvent, Notification,
    NotificationLevel, SubscriptionId,
};
