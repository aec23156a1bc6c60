use crate::api::graphql::types::{fragments::AlbumFragment, schema};

#[derive(cynic::QueryVariables, Debug)]
pub struct AddAlbumArguments<'a> {
    pub album_id: cynic::Id,
    pub name: &'a str,
    pub description: Option<&'a str>,
}

#[derive(cynic::QueryFragment, Debug)]
#[cynic(graphql_type = "Mutation", variables = "AddAlbumArguments")]
pub struct AddAlbum {
    #[arguments(albumId: $album_id, name: $name, description: $description)]
    pub add_album: Option<AlbumFragment>,
}

#[derive(cynic::QueryVariables, Debug)]
pub struct EditAlbumArguments<'a> {
    pub album_id: cynic::Id,
    pub name: Option<&'a str>,
    pub description: Option<&'a str>,
}

#[derive(cynic::QueryFragment, Debug)]
#[cynic(graphql_type = "Mutation", variables = "EditAlbumArguments")]
pub struct EditAlbum {
    #[arguments(albumId: $album_id, name: $name, description: $description)]
    pub edit_album: Option<AlbumFragment>,
}

#[derive(cynic::QueryVariables, Debug)]
pub struct DeleteAlbumArguments {
    pub album_id: cynic::Id,
}

#[derive(cynic::QueryFragment, Debug)]
#[cynic(graphql_type = "Mutation", variables = "DeleteAlbumArguments")]
pub struct DeleteAlbum {
    #[arguments(albumId: $album_id)]
    pub delete_album: Option<AlbumFragment>,
}
