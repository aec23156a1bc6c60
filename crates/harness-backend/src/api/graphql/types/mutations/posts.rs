use crate::api::graphql::types::{
    enums::{ImageFormat, PostType},
    fragments::PostFragment,
    schema,
};

#[derive(cynic::InputObject, Debug, Default, Clone)]
pub struct ImageInput<'a> {
    pub image_format: Option<ImageFormat>,
    pub taken_in_real: Option<bool>,
    pub original_format: Option<&'a str>,
}

#[derive(cynic::QueryVariables, Debug)]
pub struct AddPostArguments<'a> {
    /// assigned by the client
    pub post_id: cynic::Id,
    pub post_type: Option<PostType>,
    pub text: Option<&'a str>,
    pub album_id: Option<cynic::Id>,
    /// ISO-8601 duration after which the post expires
    pub lifetime: Option<&'a str>,
    pub comments_disabled: Option<bool>,
    pub likes_disabled: Option<bool>,
    pub image_input: Option<ImageInput<'a>>,
}

impl<'a> AddPostArguments<'a> {
    pub fn new(post_id: impl Into<String>, post_type: PostType) -> Self {
        Self {
            post_id: cynic::Id::new(post_id),
            post_type: Some(post_type),
            text: None,
            album_id: None,
            lifetime: None,
            comments_disabled: None,
            likes_disabled: None,
            image_input: None,
        }
    }

    #[must_use]
    pub fn text(mut self, text: &'a str) -> Self {
        self.text = Some(text);
        self
    }

    #[must_use]
    pub fn album(mut self, album_id: impl Into<String>) -> Self {
        self.album_id = Some(cynic::Id::new(album_id));
        self
    }

    #[must_use]
    pub fn lifetime(mut self, lifetime: &'a str) -> Self {
        self.lifetime = Some(lifetime);
        self
    }

    #[must_use]
    pub fn image(mut self, image_input: ImageInput<'a>) -> Self {
        self.image_input = Some(image_input);
        self
    }
}

#[derive(cynic::QueryFragment, Debug)]
#[cynic(graphql_type = "Mutation", variables = "AddPostArguments")]
pub struct AddPost {
    #[arguments(
        postId: $post_id,
        postType: $post_type,
        text: $text,
        albumId: $album_id,
        lifetime: $lifetime,
        commentsDisabled: $comments_disabled,
        likesDisabled: $likes_disabled,
        imageInput: $image_input
    )]
    pub add_post: Option<PostFragment>,
}

#[derive(cynic::QueryVariables, Debug)]
pub struct EditPostArguments<'a> {
    pub post_id: cynic::Id,
    pub text: Option<&'a str>,
    pub comments_disabled: Option<bool>,
    pub likes_disabled: Option<bool>,
}

#[derive(cynic::QueryFragment, Debug)]
#[cynic(graphql_type = "Mutation", variables = "EditPostArguments")]
pub struct EditPost {
    #[arguments(postId: $post_id, text: $text, commentsDisabled: $comments_disabled, likesDisabled: $likes_disabled)]
    pub edit_post: Option<PostFragment>,
}

/// variables of the mutations acting on a single post
#[derive(cynic::QueryVariables, Debug)]
pub struct PostIdArguments {
    pub post_id: cynic::Id,
}

impl PostIdArguments {
    pub fn new(post_id: impl Into<String>) -> Self {
        Self {
            post_id: cynic::Id::new(post_id),
        }
    }
}

#[derive(cynic::QueryFragment, Debug)]
#[cynic(graphql_type = "Mutation", variables = "PostIdArguments")]
pub struct ArchivePost {
    #[arguments(postId: $post_id)]
    pub archive_post: Option<PostFragment>,
}

#[derive(cynic::QueryFragment, Debug)]
#[cynic(graphql_type = "Mutation", variables = "PostIdArguments")]
pub struct RestoreArchivedPost {
    #[arguments(postId: $post_id)]
    pub restore_archived_post: Option<PostFragment>,
}

#[derive(cynic::QueryFragment, Debug)]
#[cynic(graphql_type = "Mutation", variables = "PostIdArguments")]
pub struct DeletePost {
    #[arguments(postId: $post_id)]
    pub delete_post: Option<PostFragment>,
}

#[derive(cynic::QueryFragment, Debug)]
#[cynic(graphql_type = "Mutation", variables = "PostIdArguments")]
pub struct FlagPost {
    #[arguments(postId: $post_id)]
    pub flag_post: Option<PostFragment>,
}

#[derive(cynic::QueryFragment, Debug)]
#[cynic(graphql_type = "Mutation", variables = "PostIdArguments")]
pub struct OnymouslyLikePost {
    #[arguments(postId: $post_id)]
    pub onymously_like_post: Option<PostFragment>,
}

#[derive(cynic::QueryFragment, Debug)]
#[cynic(graphql_type = "Mutation", variables = "PostIdArguments")]
pub struct AnonymouslyLikePost {
    #[arguments(postId: $post_id)]
    pub anonymously_like_post: Option<PostFragment>,
}

#[derive(cynic::QueryFragment, Debug)]
#[cynic(graphql_type = "Mutation", variables = "PostIdArguments")]
pub struct DislikePost {
    #[arguments(postId: $post_id)]
    pub dislike_post: Option<PostFragment>,
}

#[derive(cynic::QueryVariables, Debug)]
pub struct ReportPostViewsArguments {
    pub post_ids: Vec<cynic::Id>,
}

#[derive(cynic::QueryFragment, Debug)]
#[cynic(graphql_type = "Mutation", variables = "ReportPostViewsArguments")]
pub struct ReportPostViews {
    #[arguments(postIds: $post_ids)]
    pub report_post_views: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use cynic::MutationBuilder;

    #[test]
    fn add_post_sends_only_the_chosen_fields() {
        let operation = AddPost::build(
            AddPostArguments::new("post-1", PostType::Image).image(ImageInput {
                image_format: Some(ImageFormat::Heic),
                ..ImageInput::default()
            }),
        );

        let variables = serde_json::to_value(&operation.variables).unwrap();

        assert_eq!(variables["postId"], "post-1");
        assert_eq!(variables["postType"], "IMAGE");
        assert_eq!(variables["imageInput"]["imageFormat"], "HEIC");
        assert!(variables["text"].is_null());
        assert!(operation.query.contains("imageUploadUrl"));
    }
}
