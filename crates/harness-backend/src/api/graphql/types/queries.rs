use super::{
    enums::{PostStatus, PostType},
    fragments::{
        AlbumFragment, CardFragment, ChatFragment, PaginatedCardsFragment, PaginatedChatMessagesFragment,
        PaginatedCommentsFragment, PaginatedPostsFragment, PaginatedUsersFragment, PostFragment, PostStatusFragment,
        UserFragment,
    },
    schema,
};

#[derive(cynic::QueryFragment, Debug)]
#[cynic(graphql_type = "Query")]
pub struct SelfQuery {
    #[cynic(rename = "self")]
    pub viewer: UserFragment,
}

#[derive(cynic::QueryVariables, Debug)]
pub struct PaginationArguments<'a> {
    pub limit: Option<i32>,
    pub next_token: Option<&'a str>,
}

#[derive(cynic::QueryFragment, Debug)]
#[cynic(graphql_type = "User", variables = "PaginationArguments")]
pub struct UserCards {
    pub user_id: cynic::Id,
    #[arguments(limit: $limit, nextToken: $next_token)]
    pub cards: Option<PaginatedCardsFragment>,
}

#[derive(cynic::QueryFragment, Debug)]
#[cynic(graphql_type = "Query", variables = "PaginationArguments")]
pub struct SelfCardsQuery {
    #[cynic(rename = "self")]
    pub viewer: UserCards,
}

impl SelfCardsQuery {
    pub fn into_cards(self) -> Vec<CardFragment> {
        self.viewer.cards.map(|cards| cards.items).unwrap_or_default()
    }
}

#[derive(cynic::QueryFragment, Debug)]
#[cynic(graphql_type = "PaginatedChats")]
pub struct PaginatedChats {
    pub items: Vec<ChatFragment>,
    pub next_token: Option<String>,
}

#[derive(cynic::QueryFragment, Debug)]
#[cynic(graphql_type = "User", variables = "PaginationArguments")]
pub struct UserChats {
    pub user_id: cynic::Id,
    pub chats_with_unviewed_messages_count: Option<i32>,
    #[arguments(limit: $limit, nextToken: $next_token)]
    pub chats: Option<PaginatedChats>,
}

#[derive(cynic::QueryFragment, Debug)]
#[cynic(graphql_type = "Query", variables = "PaginationArguments")]
pub struct SelfChatsQuery {
    #[cynic(rename = "self")]
    pub viewer: UserChats,
}

#[derive(cynic::QueryVariables, Debug)]
pub struct UserArguments {
    pub user_id: cynic::Id,
}

#[derive(cynic::QueryFragment, Debug)]
#[cynic(graphql_type = "Query", variables = "UserArguments")]
pub struct UserQuery {
    #[arguments(userId: $user_id)]
    pub user: Option<UserFragment>,
}

#[derive(cynic::QueryVariables, Debug)]
pub struct UserPostsArguments<'a> {
    pub user_id: cynic::Id,
    pub post_status: Option<PostStatus>,
    pub post_type: Option<PostType>,
    pub limit: Option<i32>,
    pub next_token: Option<&'a str>,
}

#[derive(cynic::QueryFragment, Debug)]
#[cynic(graphql_type = "User", variables = "UserPostsArguments")]
pub struct UserPosts {
    pub user_id: cynic::Id,
    pub post_count: Option<i32>,
    #[arguments(postStatus: $post_status, postType: $post_type, limit: $limit, nextToken: $next_token)]
    pub posts: Option<PaginatedPostsFragment>,
}

#[derive(cynic::QueryFragment, Debug)]
#[cynic(graphql_type = "Query", variables = "UserPostsArguments")]
pub struct UserPostsQuery {
    #[arguments(userId: $user_id)]
    pub user: Option<UserPosts>,
}

#[derive(cynic::QueryVariables, Debug)]
pub struct PostArguments {
    pub post_id: cynic::Id,
}

#[derive(cynic::QueryFragment, Debug)]
#[cynic(graphql_type = "Query", variables = "PostArguments")]
pub struct PostQuery {
    #[arguments(postId: $post_id)]
    pub post: Option<PostFragment>,
}

#[derive(cynic::QueryFragment, Debug)]
#[cynic(graphql_type = "Query", variables = "PostArguments")]
pub struct PostStatusQuery {
    #[arguments(postId: $post_id)]
    pub post: Option<PostStatusFragment>,
}

#[derive(cynic::QueryVariables, Debug)]
pub struct PostCommentsArguments<'a> {
    pub post_id: cynic::Id,
    pub limit: Option<i32>,
    pub next_token: Option<&'a str>,
}

#[derive(cynic::QueryFragment, Debug)]
#[cynic(graphql_type = "Post", variables = "PostCommentsArguments")]
pub struct PostComments {
    pub post_id: cynic::Id,
    pub comments_count: Option<i32>,
    #[arguments(limit: $limit, nextToken: $next_token)]
    pub comments: Option<PaginatedCommentsFragment>,
}

#[derive(cynic::QueryFragment, Debug)]
#[cynic(graphql_type = "Query", variables = "PostCommentsArguments")]
pub struct PostCommentsQuery {
    #[arguments(postId: $post_id)]
    pub post: Option<PostComments>,
}

#[derive(cynic::QueryVariables, Debug)]
pub struct AlbumArguments {
    pub album_id: cynic::Id,
}

#[derive(cynic::QueryFragment, Debug)]
#[cynic(graphql_type = "Query", variables = "AlbumArguments")]
pub struct AlbumQuery {
    #[arguments(albumId: $album_id)]
    pub album: Option<AlbumFragment>,
}

#[derive(cynic::QueryVariables, Debug)]
pub struct ChatArguments<'a> {
    pub chat_id: cynic::Id,
    pub limit: Option<i32>,
    pub next_token: Option<&'a str>,
}

#[derive(cynic::QueryFragment, Debug)]
#[cynic(graphql_type = "Chat", variables = "ChatArguments")]
pub struct ChatWithMessages {
    pub chat_id: cynic::Id,
    pub chat_type: super::enums::ChatType,
    pub name: Option<String>,
    pub user_count: Option<i32>,
    pub messages_count: Option<i32>,
    #[arguments(limit: $limit, nextToken: $next_token)]
    pub users: Option<PaginatedUsersFragment>,
    #[arguments(limit: $limit, nextToken: $next_token)]
    pub messages: Option<PaginatedChatMessagesFragment>,
}

#[derive(cynic::QueryFragment, Debug)]
#[cynic(graphql_type = "Query", variables = "ChatArguments")]
pub struct ChatQuery {
    #[arguments(chatId: $chat_id)]
    pub chat: Option<ChatWithMessages>,
}

#[derive(cynic::QueryFragment, Debug)]
#[cynic(graphql_type = "Query", variables = "PaginationArguments")]
pub struct TrendingPostsQuery {
    #[arguments(limit: $limit, nextToken: $next_token)]
    pub trending_posts: PaginatedPostsFragment,
}

#[derive(cynic::QueryFragment, Debug)]
#[cynic(graphql_type = "Query", variables = "PaginationArguments")]
pub struct TrendingUsersQuery {
    #[arguments(limit: $limit, nextToken: $next_token)]
    pub trending_users: PaginatedUsersFragment,
}

#[derive(cynic::QueryVariables, Debug)]
pub struct SearchUsersArguments<'a> {
    pub search_token: &'a str,
    pub limit: Option<i32>,
    pub next_token: Option<&'a str>,
}

#[derive(cynic::QueryFragment, Debug)]
#[cynic(graphql_type = "Query", variables = "SearchUsersArguments")]
pub struct SearchUsersQuery {
    #[arguments(searchToken: $search_token, limit: $limit, nextToken: $next_token)]
    pub search_users: PaginatedUsersFragment,
}

#[cfg(test)]
mod tests {
    use super::*;
    use cynic::QueryBuilder;

    #[test]
    fn post_query_inlines_the_post_selection() {
        let operation = PostQuery::build(PostArguments {
            post_id: cynic::Id::new("post-1"),
        });

        assert!(operation.query.contains("post(postId: $postId)"));
        assert!(operation.query.contains("postStatus"));
        assert!(operation.query.contains("postedBy"));
        assert_eq!(
            serde_json::to_value(&operation.variables).unwrap(),
            serde_json::json!({ "postId": "post-1" })
        );
    }

    #[test]
    fn self_query_selects_the_self_field() {
        let operation = SelfQuery::build(());

        assert!(operation.query.contains("self {"));
        assert!(operation.query.contains("userId"));
    }
}
