//! Defines traits and implementations for external title metadata providers.

use crate::genres;
use crate::media::CatalogSort;
use crate::media::MediaKind;
use crate::media::TrendWindow;
use crate::ApiError;
use serde::Deserialize;
use serde::Serialize;

/// One listing row from the upstream catalog, normalized across the
/// movie and series response shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogTitle {
    pub id: u64,
    pub title: String,
    pub kind: MediaKind,
    pub overview: String,
    pub poster_path: Option<String>,
    pub vote_average: f64,
    pub year: Option<i32>,
    pub genre_ids: Vec<u32>,
}

impl CatalogTitle {
    pub fn genre_labels(&self) -> Vec<String> {
        genres::labels_for(&self.genre_ids)
    }

    /// Full image URL for the poster, if the listing carries one.
    pub fn poster_url(&self) -> Option<String> {
        self.poster_path
            .as_deref()
            .map(|path| format!("https://image.tmdb.org/t/p/w500{path}"))
    }
}

/// A trait for any service that can list and search title metadata.
pub trait MetadataProvider {
    /// Titles trending over the given window, one page at a time.
    async fn trending(
        &self,
        kind: MediaKind,
        window: TrendWindow,
        page: u32,
    ) -> Result<Vec<CatalogTitle>, ApiError>;

    /// Titles in one genre, ordered by the requested sort.
    async fn discover(
        &self,
        kind: MediaKind,
        genre_id: u32,
        sort: CatalogSort,
        page: u32,
    ) -> Result<Vec<CatalogTitle>, ApiError>;

    /// Free-text title search.
    async fn search(&self, kind: MediaKind, query: &str) -> Result<Vec<CatalogTitle>, ApiError>;
}

/// Provides title metadata from the public TMDB v3 API.
pub mod tmdb {
    use super::*;

    /// The structure of a paginated TMDB listing response.
    #[derive(Deserialize, Debug)]
    struct ListingPage {
        #[serde(default)]
        results: Vec<RawTitle>,
    }

    /// One raw listing row. Movies carry `title`/`release_date`, series
    /// carry `name`/`first_air_date`; everything else is shared.
    #[derive(Deserialize, Debug)]
    struct RawTitle {
        id: u64,
        title: Option<String>,
        name: Option<String>,
        #[serde(default)]
        overview: String,
        poster_path: Option<String>,
        #[serde(default)]
        vote_average: f64,
        release_date: Option<String>,
        first_air_date: Option<String>,
        #[serde(default)]
        genre_ids: Vec<u32>,
    }

    impl RawTitle {
        fn into_catalog(self, kind: MediaKind) -> Option<CatalogTitle> {
            let title = match kind {
                MediaKind::Movie => self.title,
                MediaKind::Series => self.name,
            }?;
            let year = match kind {
                MediaKind::Movie => self.release_date,
                MediaKind::Series => self.first_air_date,
            }
            .and_then(|date| year_of(&date));

            Some(CatalogTitle {
                id: self.id,
                title,
                kind,
                overview: self.overview,
                poster_path: self.poster_path,
                vote_average: self.vote_average,
                year,
                genre_ids: self.genre_ids,
            })
        }
    }

    /// Leading `YYYY` of a `YYYY-MM-DD` date string.
    fn year_of(date: &str) -> Option<i32> {
        date.get(..4).and_then(|y| y.parse().ok())
    }

    /// An implementation of the `MetadataProvider` trait for TMDB.
    pub struct Tmdb {
        base_url: String,
        api_key: String,
    }

    impl Tmdb {
        /// Reads the access credential and optional base-URL override from
        /// the environment.
        ///
        /// # Environment Variables
        /// - `TMDB_API_KEY`: the v3 API read token (required).
        /// - `TMDB_BASE_URL`: defaults to the public endpoint.
        pub fn from_env() -> Result<Self, ApiError> {
            let api_key = std::env::var("TMDB_API_KEY")
                .map_err(|_| anyhow::anyhow!("TMDB_API_KEY environment variable is not set"))?;
            let base_url = std::env::var("TMDB_BASE_URL")
                .unwrap_or_else(|_| "https://api.themoviedb.org/3".to_string());
            Ok(Self { base_url, api_key })
        }

        async fn fetch_page(&self, url: String, kind: MediaKind) -> Result<Vec<CatalogTitle>, ApiError> {
            let client = reqwest::Client::new();
            let page = client
                .get(&url)
                .bearer_auth(&self.api_key)
                .send()
                .await?
                .error_for_status()?
                .json::<ListingPage>()
                .await?;

            Ok(page
                .results
                .into_iter()
                .filter_map(|raw| raw.into_catalog(kind))
                .collect())
        }
    }

    impl MetadataProvider for Tmdb {
        async fn trending(
            &self,
            kind: MediaKind,
            window: TrendWindow,
            page: u32,
        ) -> Result<Vec<CatalogTitle>, ApiError> {
            let url = format!(
                "{}/trending/{}/{}?page={page}",
                self.base_url,
                kind.api_path(),
                window.api_path(),
            );
            self.fetch_page(url, kind).await
        }

        async fn discover(
            &self,
            kind: MediaKind,
            genre_id: u32,
            sort: CatalogSort,
            page: u32,
        ) -> Result<Vec<CatalogTitle>, ApiError> {
            let url = format!(
                "{}/discover/{}?with_genres={genre_id}&sort_by={}&vote_count.gte=100&page={page}",
                self.base_url,
                kind.api_path(),
                sort.api_param(kind),
            );
            self.fetch_page(url, kind).await
        }

        async fn search(&self, kind: MediaKind, query: &str) -> Result<Vec<CatalogTitle>, ApiError> {
            let url = format!(
                "{}/search/{}?query={}&page=1",
                self.base_url,
                kind.api_path(),
                urlencode(query),
            );
            self.fetch_page(url, kind).await
        }
    }

    /// Minimal percent-encoding for the query parameter.
    fn urlencode(raw: &str) -> String {
        let mut encoded = String::with_capacity(raw.len());
        for byte in raw.bytes() {
            match byte {
                b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                    encoded.push(byte as char)
                }
                b' ' => encoded.push('+'),
                other => encoded.push_str(&format!("%{other:02X}")),
            }
        }
        encoded
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        fn raw(title: Option<&str>, name: Option<&str>, date: Option<&str>) -> RawTitle {
            RawTitle {
                id: 603,
                title: title.map(str::to_owned),
                name: name.map(str::to_owned),
                overview: String::new(),
                poster_path: None,
                vote_average: 8.1,
                release_date: date.map(str::to_owned),
                first_air_date: date.map(str::to_owned),
                genre_ids: vec![878],
            }
        }

        #[test]
        fn movie_rows_use_title_and_release_year() {
            let catalog = raw(Some("The Matrix"), None, Some("1999-03-31"))
                .into_catalog(MediaKind::Movie)
                .unwrap();
            assert_eq!(catalog.title, "The Matrix");
            assert_eq!(catalog.year, Some(1999));
        }

        #[test]
        fn series_rows_use_name_and_first_air_year() {
            let catalog = raw(None, Some("Dark"), Some("2017-12-01"))
                .into_catalog(MediaKind::Series)
                .unwrap();
            assert_eq!(catalog.title, "Dark");
            assert_eq!(catalog.year, Some(2017));
        }

        #[test]
        fn rows_missing_their_kind_title_are_dropped() {
            assert!(raw(None, Some("Dark"), None).into_catalog(MediaKind::Movie).is_none());
        }

        #[test]
        fn malformed_dates_leave_the_year_unset() {
            let catalog = raw(Some("X"), None, Some("tba"))
                .into_catalog(MediaKind::Movie)
                .unwrap();
            assert_eq!(catalog.year, None);
        }

        #[test]
        fn queries_are_percent_encoded() {
            assert_eq!(urlencode("blade runner 2049"), "blade+runner+2049");
            assert_eq!(urlencode("wall·e"), "wall%C2%B7e");
        }
    }
}
