//! Notification collaborator: fire-and-forget user notifications.

use bevy_ecs::prelude::Resource;

pub trait Notifier: Send + Sync {
    fn notify(&self, title: &str, body: &str);
}

#[derive(Resource)]
pub struct NotifierResource(pub Box<dyn Notifier>);

/// Drops every notification. Matches the behaviour when notification
/// permission is absent: not an error, simply a no-op.
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn notify(&self, _title: &str, _body: &str) {}
}
