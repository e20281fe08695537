// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::path::Path;

use include_dir::{Dir, include_dir};
use serde::Serialize;

static EXPLORER_DIR: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/assets");

pub(crate) const INDEX_PATH: &str = "index.html";

/// The asset's bytes, with the endpoint substituted into `index.html`.
pub(crate) fn get_asset_bytes<P: AsRef<Path>>(
    file_name: P,
    graphql_http_path: &str,
) -> Option<Vec<u8>> {
    let file = EXPLORER_DIR.get_file(file_name.as_ref())?;

    if file_name.as_ref() != Path::new(INDEX_PATH) {
        return Some(file.contents().to_owned());
    }

    let index = file.contents_utf8()?;

    let config = ExplorerConfig {
        graphql_http_path: graphql_http_path.to_string(),
    };
    let config = serde_json::to_string(&config).ok()?;

    let index = index
        .replace(
            "window.leagueConfig = {}",
            &format!("window.leagueConfig = {config}"),
        )
        .replace("%%GRAPHQL_HTTP_PATH%%", graphql_http_path);

    Some(index.into_bytes())
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ExplorerConfig {
    graphql_http_path: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_substitution() {
        let index = String::from_utf8(get_asset_bytes(INDEX_PATH, "/league").unwrap()).unwrap();

        assert!(index.contains(r#"window.leagueConfig = {"graphqlHttpPath":"/league"}"#));
        assert!(index.contains(r#"<script src="/league/explorer.js">"#));
        assert!(!index.contains("%%GRAPHQL_HTTP_PATH%%"));
    }

    #[test]
    fn other_assets_are_served_verbatim() {
        let script = get_asset_bytes("explorer.js", "/league").unwrap();
        assert!(String::from_utf8(script).unwrap().contains("leagueConfig"));

        assert!(get_asset_bytes("missing.js", "/league").is_none());
    }
}
