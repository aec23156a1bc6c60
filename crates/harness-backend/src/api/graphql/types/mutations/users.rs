use crate::api::graphql::types::{enums::PrivacyStatus, fragments::UserFragment, schema};

#[derive(cynic::QueryVariables, Debug)]
pub struct SetUsernameArguments<'a> {
    pub username: &'a str,
}

#[derive(cynic::QueryFragment, Debug)]
#[cynic(graphql_type = "Mutation", variables = "SetUsernameArguments")]
pub struct SetUsername {
    #[arguments(username: $username)]
    pub set_username: Option<UserFragment>,
}

#[derive(cynic::QueryVariables, Debug, Default)]
pub struct SetUserDetailsArguments<'a> {
    pub full_name: Option<&'a str>,
    pub bio: Option<&'a str>,
    pub privacy_status: Option<PrivacyStatus>,
}

#[derive(cynic::QueryFragment, Debug)]
#[cynic(graphql_type = "Mutation", variables = "SetUserDetailsArguments")]
pub struct SetUserDetails {
    #[arguments(fullName: $full_name, bio: $bio, privacyStatus: $privacy_status)]
    pub set_user_details: Option<UserFragment>,
}

#[derive(cynic::QueryVariables, Debug)]
pub struct SetUserPasswordArguments<'a> {
    /// the password encrypted with the backend's public key, see [`crate::api::password`]
    pub encrypted_password: &'a str,
}

#[derive(cynic::QueryFragment, Debug)]
#[cynic(graphql_type = "Mutation", variables = "SetUserPasswordArguments")]
pub struct SetUserPassword {
    #[arguments(encryptedPassword: $encrypted_password)]
    pub set_user_password: Option<UserFragment>,
}

#[derive(cynic::QueryVariables, Debug)]
pub struct ResetUserArguments<'a> {
    pub new_username: Option<&'a str>,
}

/// returns the caller's user to its defaults, keeping the identity
#[derive(cynic::QueryFragment, Debug)]
#[cynic(graphql_type = "Mutation", variables = "ResetUserArguments")]
pub struct ResetUser {
    #[arguments(newUsername: $new_username)]
    pub reset_user: Option<UserFragment>,
}

#[derive(cynic::QueryFragment, Debug)]
#[cynic(graphql_type = "Mutation")]
pub struct DeleteUser {
    pub delete_user: Option<UserFragment>,
}

#[derive(cynic::QueryFragment, Debug)]
#[cynic(graphql_type = "Mutation")]
pub struct DisableUser {
    pub disable_user: Option<UserFragment>,
}

/// variables of the mutations acting on another user
#[derive(cynic::QueryVariables, Debug)]
pub struct OtherUserArguments {
    pub user_id: cynic::Id,
}

#[derive(cynic::QueryFragment, Debug)]
#[cynic(graphql_type = "Mutation", variables = "OtherUserArguments")]
pub struct FollowUser {
    #[arguments(userId: $user_id)]
    pub follow_user: Option<UserFragment>,
}

#[derive(cynic::QueryFragment, Debug)]
#[cynic(graphql_type = "Mutation", variables = "OtherUserArguments")]
pub struct UnfollowUser {
    #[arguments(userId: $user_id)]
    pub unfollow_user: Option<UserFragment>,
}

#[derive(cynic::QueryFragment, Debug)]
#[cynic(graphql_type = "Mutation", variables = "OtherUserArguments")]
pub struct BlockUser {
    #[arguments(userId: $user_id)]
    pub block_user: Option<UserFragment>,
}

#[derive(cynic::QueryFragment, Debug)]
#[cynic(graphql_type = "Mutation", variables = "OtherUserArguments")]
pub struct UnblockUser {
    #[arguments(userId: $user_id)]
    pub unblock_user: Option<UserFragment>,
}
