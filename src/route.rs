//! Navigable addresses
//!
//! Every view has a textual route so the list state can travel with a
//! navigation and be restored exactly:
//!
//! - `/` or `/?search=space&genre=3&page=2` → show list
//! - `/shows/{id}` → show detail
//!
//! Default values (empty search, no genre, page 1) are left out when a
//! route is formatted, so `parse(route.to_string()) == route`.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::models::QueryState;

/// Route parse errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    #[error("Unknown route: {0}")]
    UnknownPath(String),

    #[error("Invalid value for '{key}': {value}")]
    InvalidParam { key: String, value: String },

    #[error("Missing show id")]
    MissingId,
}

/// A navigable view address
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Show list with its query state
    List(QueryState),
    /// Detail view for one show id
    Show(String),
}

impl Default for Route {
    fn default() -> Self {
        Route::List(QueryState::default())
    }
}

impl Route {
    /// Parse a route string
    pub fn parse(input: &str) -> Result<Self, RouteError> {
        let input = input.trim();
        let (path, query) = match input.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (input, None),
        };

        let path = path.trim_end_matches('/');
        if path.is_empty() {
            return Ok(Route::List(parse_query(query.unwrap_or(""))?));
        }

        if let Some(id) = path.strip_prefix("/shows/") {
            if id.is_empty() || id.contains('/') {
                return Err(RouteError::MissingId);
            }
            let id = urlencoding::decode(id)
                .map_err(|_| invalid("id", id))?
                .into_owned();
            return Ok(Route::Show(id));
        }

        if path == "/shows" {
            return Err(RouteError::MissingId);
        }

        Err(RouteError::UnknownPath(input.to_string()))
    }
}

impl FromStr for Route {
    type Err = RouteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Route::parse(s)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Show(id) => write!(f, "/shows/{}", urlencoding::encode(id)),
            Route::List(query) => {
                let mut params = Vec::new();
                if !query.search.is_empty() {
                    params.push(format!("search={}", urlencoding::encode(&query.search)));
                }
                if let Some(genre) = query.genre {
                    params.push(format!("genre={}", genre));
                }
                if query.page > 1 {
                    params.push(format!("page={}", query.page));
                }

                if params.is_empty() {
                    write!(f, "/")
                } else {
                    write!(f, "/?{}", params.join("&"))
                }
            }
        }
    }
}

fn parse_query(query: &str) -> Result<QueryState, RouteError> {
    let mut state = QueryState::default();

    for pair in query.split('&').filter(|p| !p.is_empty()) {
        let (key, raw) = pair.split_once('=').unwrap_or((pair, ""));
        // Browsers encode spaces in query strings as '+'
        let value = urlencoding::decode(&raw.replace('+', " "))
            .map_err(|_| invalid(key, raw))?
            .into_owned();

        match key {
            "search" => state.search = value,
            "genre" => {
                // An empty genre means "all genres"
                state.genre = if value.is_empty() {
                    None
                } else {
                    Some(value.parse().map_err(|_| invalid(key, &value))?)
                };
            }
            "page" => {
                let page: usize = value.parse().map_err(|_| invalid(key, &value))?;
                if page == 0 {
                    return Err(invalid(key, &value));
                }
                state.page = page;
            }
            // Unknown parameters are ignored
            _ => {}
        }
    }

    Ok(state)
}

fn invalid(key: &str, value: &str) -> RouteError {
    RouteError::InvalidParam {
        key: key.to_string(),
        value: value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_is_default_list() {
        assert_eq!(Route::parse("/").unwrap(), Route::default());
        assert_eq!(Route::parse("").unwrap(), Route::default());
        assert_eq!(Route::default().to_string(), "/");
    }

    #[test]
    fn test_list_query_params() {
        let route = Route::parse("/?search=deep%20space&genre=3&page=2").unwrap();
        assert_eq!(
            route,
            Route::List(QueryState {
                search: "deep space".into(),
                genre: Some(3),
                page: 2,
            })
        );
    }

    #[test]
    fn test_plus_decodes_as_space() {
        let route = Route::parse("/?search=true+crime").unwrap();
        match route {
            Route::List(q) => assert_eq!(q.search, "true crime"),
            other => panic!("Expected list route, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_genre_means_all() {
        let route = Route::parse("/?search=&genre=").unwrap();
        assert_eq!(route, Route::default());
    }

    #[test]
    fn test_show_route() {
        assert_eq!(
            Route::parse("/shows/10716").unwrap(),
            Route::Show("10716".into())
        );
        assert_eq!(Route::Show("10716".into()).to_string(), "/shows/10716");
    }

    #[test]
    fn test_round_trip() {
        let routes = [
            Route::default(),
            Route::List(QueryState {
                search: "Space & Time / 100% #1".into(),
                genre: Some(9),
                page: 3,
            }),
            Route::List(QueryState::new("", Some(1))),
            Route::Show("a b".into()),
        ];
        for route in routes {
            let text = route.to_string();
            assert_eq!(Route::parse(&text).unwrap(), route, "{}", text);
        }
    }

    #[test]
    fn test_errors() {
        assert_eq!(Route::parse("/shows/"), Err(RouteError::MissingId));
        assert_eq!(Route::parse("/shows"), Err(RouteError::MissingId));
        assert!(matches!(
            Route::parse("/podcasts"),
            Err(RouteError::UnknownPath(_))
        ));
        assert!(matches!(
            Route::parse("/?page=zero"),
            Err(RouteError::InvalidParam { .. })
        ));
        assert!(matches!(
            Route::parse("/?page=0"),
            Err(RouteError::InvalidParam { .. })
        ));
        assert!(matches!(
            Route::parse("/?genre=comedy"),
            Err(RouteError::InvalidParam { .. })
        ));
    }

    #[test]
    fn test_undecodable_show_id_is_invalid() {
        assert_eq!(
            Route::parse("/shows/a%FF"),
            Err(RouteError::InvalidParam {
                key: "id".into(),
                value: "a%FF".into(),
            })
        );
    }
}
