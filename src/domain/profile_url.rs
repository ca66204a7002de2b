use url::Url;

const PROFILE_HOST: &str = "linkedin.com";
const PROFILE_PATH_PREFIX: &str = "in";

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum ProfileUrlError {
    #[error("{0} is not a valid url")]
    Malformed(String),
    #[error("unsupported url scheme: {0}")]
    UnsupportedScheme(String),
    #[error("{0} is not a linkedin.com profile url")]
    ForeignHost(String),
    #[error("url does not contain a /in/<profile> path")]
    MissingSlug,
}

/// A public profile url that passed validation, e.g. `https://www.linkedin.com/in/john-doe/`.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileUrl {
    url: Url,
    slug: String,
}

impl ProfileUrl {
    pub fn parse(raw: &str) -> Result<ProfileUrl, ProfileUrlError> {
        let raw = raw.trim();
        let url = match Url::parse(raw) {
            Ok(url) => url,
            Err(url::ParseError::RelativeUrlWithoutBase) => Url::parse(&format!("https://{}", raw))
                .map_err(|_| ProfileUrlError::Malformed(raw.to_string()))?,
            Err(_) => return Err(ProfileUrlError::Malformed(raw.to_string())),
        };

        match url.scheme() {
            "http" | "https" => {}
            other => return Err(ProfileUrlError::UnsupportedScheme(other.to_string())),
        }

        let host = url
            .host_str()
            .ok_or_else(|| ProfileUrlError::Malformed(raw.to_string()))?
            .to_lowercase();
        let is_profile_host = host == PROFILE_HOST || host.ends_with(&format!(".{}", PROFILE_HOST));
        if !is_profile_host {
            return Err(ProfileUrlError::ForeignHost(host));
        }

        let slug = match url
            .path_segments()
            .map(|segments| segments.collect::<Vec<&str>>())
            .as_deref()
        {
            Some([PROFILE_PATH_PREFIX, slug, ..]) if !slug.is_empty() => slug.to_string(),
            _ => return Err(ProfileUrlError::MissingSlug),
        };

        Ok(ProfileUrl { url, slug })
    }

    /// The profile identifier, `john-doe` for `linkedin.com/in/john-doe`.
    pub fn slug(&self) -> &str {
        &self.slug
    }

    pub fn host(&self) -> &str {
        self.url.host_str().unwrap_or(PROFILE_HOST)
    }
}

impl AsRef<str> for ProfileUrl {
    fn as_ref(&self) -> &str {
        self.url.as_str()
    }
}
