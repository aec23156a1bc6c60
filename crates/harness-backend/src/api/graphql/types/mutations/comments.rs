use crate::api::graphql::types::{fragments::CommentFragment, schema};

#[derive(cynic::QueryVariables, Debug)]
pub struct AddCommentArguments<'a> {
    pub comment_id: cynic::Id,
    pub post_id: cynic::Id,
    pub text: &'a str,
}

#[derive(cynic::QueryFragment, Debug)]
#[cynic(graphql_type = "Mutation", variables = "AddCommentArguments")]
pub struct AddComment {
    #[arguments(commentId: $comment_id, postId: $post_id, text: $text)]
    pub add_comment: Option<CommentFragment>,
}

#[derive(cynic::QueryVariables, Debug)]
pub struct DeleteCommentArguments {
    pub comment_id: cynic::Id,
}

#[derive(cynic::QueryFragment, Debug)]
#[cynic(graphql_type = "Mutation", variables = "DeleteCommentArguments")]
pub struct DeleteComment {
    #[arguments(commentId: $comment_id)]
    pub delete_comment: Option<CommentFragment>,
}
