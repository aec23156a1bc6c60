use crate::api::graphql::types::{
    fragments::{ChatFragment, ChatMessageFragment},
    schema,
};

#[derive(cynic::QueryVariables, Debug)]
pub struct CreateDirectChatArguments<'a> {
    pub chat_id: cynic::Id,
    pub user_id: cynic::Id,
    pub message_id: cynic::Id,
    pub message_text: &'a str,
}

#[derive(cynic::QueryFragment, Debug)]
#[cynic(graphql_type = "Mutation", variables = "CreateDirectChatArguments")]
pub struct CreateDirectChat {
    #[arguments(chatId: $chat_id, userId: $user_id, messageId: $message_id, messageText: $message_text)]
    pub create_direct_chat: Option<ChatFragment>,
}

#[derive(cynic::QueryVariables, Debug)]
pub struct CreateGroupChatArguments<'a> {
    pub chat_id: cynic::Id,
    pub user_ids: Vec<cynic::Id>,
    pub message_id: cynic::Id,
    pub message_text: &'a str,
    pub name: Option<&'a str>,
}

#[derive(cynic::QueryFragment, Debug)]
#[cynic(graphql_type = "Mutation", variables = "CreateGroupChatArguments")]
pub struct CreateGroupChat {
    #[arguments(
        chatId: $chat_id,
        userIds: $user_ids,
        messageId: $message_id,
        messageText: $message_text,
        name: $name
    )]
    pub create_group_chat: Option<ChatFragment>,
}

#[derive(cynic::QueryVariables, Debug)]
pub struct AddChatMessageArguments<'a> {
    pub chat_id: cynic::Id,
    pub message_id: cynic::Id,
    pub text: &'a str,
}

#[derive(cynic::QueryFragment, Debug)]
#[cynic(graphql_type = "Mutation", variables = "AddChatMessageArguments")]
pub struct AddChatMessage {
    #[arguments(chatId: $chat_id, messageId: $message_id, text: $text)]
    pub add_chat_message: Option<ChatMessageFragment>,
}

#[derive(cynic::QueryVariables, Debug)]
pub struct EditChatMessageArguments<'a> {
    pub message_id: cynic::Id,
    pub text: &'a str,
}

#[derive(cynic::QueryFragment, Debug)]
#[cynic(graphql_type = "Mutation", variables = "EditChatMessageArguments")]
pub struct EditChatMessage {
    #[arguments(messageId: $message_id, text: $text)]
    pub edit_chat_message: Option<ChatMessageFragment>,
}

#[derive(cynic::QueryVariables, Debug)]
pub struct DeleteChatMessageArguments {
    pub message_id: cynic::Id,
}

#[derive(cynic::QueryFragment, Debug)]
#[cynic(graphql_type = "Mutation", variables = "DeleteChatMessageArguments")]
pub struct DeleteChatMessage {
    #[arguments(messageId: $message_id)]
    pub delete_chat_message: Option<ChatMessageFragment>,
}

#[derive(cynic::QueryVariables, Debug)]
pub struct LeaveGroupChatArguments {
    pub chat_id: cynic::Id,
}

#[derive(cynic::QueryFragment, Debug)]
#[cynic(graphql_type = "Mutation", variables = "LeaveGroupChatArguments")]
pub struct LeaveGroupChat {
    #[arguments(chatId: $chat_id)]
    pub leave_group_chat: Option<ChatFragment>,
}
