use crate::http::ApiClient;

use super::errors::{ClientError, RawFileNotFoundError};

/// GET a raw file, folding every failure into [`RawFileNotFoundError`].
pub(crate) async fn fetch_raw_file(
    api: &ApiClient,
    uri: &str,
    extra_headers: &[(&str, &str)],
    file_path: &str,
    git_ref: &str,
) -> Result<String, RawFileNotFoundError> {
    tracing::debug!("GET {}", uri);
    let response = api
        .get(uri, extra_headers)
        .await
        .map_err(|e| RawFileNotFoundError::new(file_path, git_ref).with_source(e))?;

    if !response.is_success() {
        let cause = ClientError::Api {
            status: response.status,
            url: api.resolve(uri),
            message: response.text(),
        };
        return Err(RawFileNotFoundError::new(file_path, git_ref).with_source(cause));
    }
    Ok(response.text())
}
