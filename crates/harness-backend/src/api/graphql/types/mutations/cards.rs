use crate::api::graphql::types::{fragments::CardFragment, schema};

#[derive(cynic::QueryVariables, Debug)]
pub struct DeleteCardArguments {
    pub card_id: cynic::Id,
}

#[derive(cynic::QueryFragment, Debug)]
#[cynic(graphql_type = "Mutation", variables = "DeleteCardArguments")]
pub struct DeleteCard {
    #[arguments(cardId: $card_id)]
    pub delete_card: Option<CardFragment>,
}
