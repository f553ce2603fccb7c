use futures_util::future::try_join_all;

use crate::client::RosterClient;
use crate::error::FetchError;
use crate::models::{Character, Episode};

/// One entity's full record for the detail view: the character plus every
/// episode it appears in.
#[derive(Debug, Clone)]
pub struct CharacterDetail {
    pub character: Character,
    pub episodes: Vec<Episode>,
}

/// Fetches the character, then fans out over its episode URLs concurrently.
/// Any single episode failure fails the whole detail fetch.
pub async fn fetch_detail(client: &RosterClient, id: u64) -> Result<CharacterDetail, FetchError> {
    let character = client.fetch_character(id).await?;
    let episodes = try_join_all(
        character
            .episode
            .iter()
            .map(|url| client.fetch_episode(url)),
    )
    .await?;
    Ok(CharacterDetail {
        character,
        episodes,
    })
}
