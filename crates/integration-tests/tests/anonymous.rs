#![allow(unused_crate_dependencies)]

use backend::api::{
    errors::ApiError,
    graphql::{
        enums::PostType,
        mutations::{AddPost, AddPostArguments},
        queries::{PaginationArguments, SelfQuery, TrendingPostsQuery},
    },
};
use cynic::{MutationBuilder, QueryBuilder};
use integration_tests::{fixtures::new_id, runtime, Suite};

#[test]
#[ignore = "needs a deployed backend"]
fn anonymous() {
    runtime().block_on(async {
        let mut suite = Suite::anonymous("anonymous");

        suite
            .run("anonymous users are assigned a username", 1, |logins| async move {
                let login = &logins[0];

                let viewer = login.client().run(SelfQuery::build(())).await.unwrap().viewer;

                assert_eq!(viewer.user_id.inner(), login.user_id());
                assert!(!viewer.username.is_empty());
                assert!(login.default_username().is_empty());
            })
            .await;

        suite
            .run("anonymous users can browse trending posts", 1, |logins| async move {
                let trending = logins[0]
                    .client()
                    .run(TrendingPostsQuery::build(PaginationArguments {
                        limit: Some(5),
                        next_token: None,
                    }))
                    .await
                    .unwrap()
                    .trending_posts;

                assert!(trending.items.len() <= 5);
            })
            .await;

        suite
            .run("anonymous users cannot post", 1, |logins| async move {
                let error = logins[0]
                    .client()
                    .run(AddPost::build(
                        AddPostArguments::new(new_id(), PostType::TextOnly).text("not allowed"),
                    ))
                    .await
                    .unwrap_err();

                assert!(matches!(error, ApiError::Graphql(_)), "{error}");
            })
            .await;

        suite.finish().await.unwrap();
    });
}
