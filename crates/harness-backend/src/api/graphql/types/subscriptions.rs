use super::{
    fragments::{CardNotificationFragment, ChatMessageNotificationFragment, NotificationFragment},
    schema,
};

/// every subscription is scoped to the user receiving the events
#[derive(cynic::QueryVariables, Debug, Clone)]
pub struct SubscriberArguments {
    pub user_id: cynic::Id,
}

impl SubscriberArguments {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: cynic::Id::new(user_id),
        }
    }
}

#[derive(cynic::QueryFragment, Debug)]
#[cynic(graphql_type = "Subscription", variables = "SubscriberArguments")]
pub struct OnNotification {
    #[arguments(userId: $user_id)]
    pub on_notification: Option<NotificationFragment>,
}

#[derive(cynic::QueryFragment, Debug)]
#[cynic(graphql_type = "Subscription", variables = "SubscriberArguments")]
pub struct OnChatMessageNotification {
    #[arguments(userId: $user_id)]
    pub on_chat_message_notification: Option<ChatMessageNotificationFragment>,
}

#[derive(cynic::QueryFragment, Debug)]
#[cynic(graphql_type = "Subscription", variables = "SubscriberArguments")]
pub struct OnCardNotification {
    #[arguments(userId: $user_id)]
    pub on_card_notification: Option<CardNotificationFragment>,
}
