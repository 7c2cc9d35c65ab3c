//! HTTP request type.

use std::collections::HashMap;
use std::str::FromStr;

use bytes::Bytes;
use futures::stream;

use crate::body::{FormData, FormPart, UploadedFile};
use crate::error::Result;

/// HTTP request methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// GET method
    Get,
    /// POST method
    Post,
    /// PUT method
    Put,
    /// PATCH method
    Patch,
    /// DELETE method
    Delete,
}

impl Method {
    /// Returns the method as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl FromStr for Method {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "GET" => Ok(Self::Get),
            "POST" => Ok(Self::Post),
            "PUT" => Ok(Self::Put),
            "PATCH" => Ok(Self::Patch),
            "DELETE" => Ok(Self::Delete),
            other => Err(format!("unsupported method: {other}")),
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Path parameters extracted from the URL.
#[derive(Debug, Clone, Default)]
pub struct PathParams {
    params: HashMap<String, String>,
}

impl PathParams {
    /// Creates new empty path params.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a parameter.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.params.insert(key.into(), value.into());
    }

    /// Gets a parameter value.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// Parses a parameter as a specific type.
    pub fn parse<T: FromStr>(&self, key: &str) -> Option<T> {
        self.get(key).and_then(|v| v.parse().ok())
    }
}

/// An HTTP request.
#[derive(Debug, Clone)]
pub struct Request {
    /// HTTP method.
    pub method: Method,
    /// Request path, without the query string.
    pub path: String,
    /// Path parameters extracted from URL patterns.
    pub params: PathParams,
    /// Query string parameters.
    pub query: HashMap<String, String>,
    /// Request headers.
    pub headers: HashMap<String, String>,
    /// Request body.
    pub body: Vec<u8>,
}

impl Request {
    /// Creates a new request.
    ///
    /// A query string in `target` (`/search?q=rust`) is split off into [`Request::query`].
    pub fn new(method: Method, target: impl Into<String>) -> Self {
        let target = target.into();
        let (path, query) = match target.split_once('?') {
            Some((path, query)) => (path.to_string(), Self::parse_query_string(query)),
            None => (target, HashMap::new()),
        };

        Self {
            method,
            path,
            params: PathParams::new(),
            query,
            headers: HashMap::new(),
            body: Vec::new(),
        }
    }

    /// Creates a GET request.
    pub fn get(target: impl Into<String>) -> Self {
        Self::new(Method::Get, target)
    }

    /// Creates a POST request.
    pub fn post(target: impl Into<String>) -> Self {
        Self::new(Method::Post, target)
    }

    /// Sets a header.
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Sets the body.
    #[must_use]
    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    /// Sets an `application/x-www-form-urlencoded` body.
    #[must_use]
    pub fn form_body(self, encoded: impl Into<String>) -> Self {
        self.header("Content-Type", "application/x-www-form-urlencoded")
            .body(encoded.into())
    }

    /// Sets a query parameter.
    #[must_use]
    pub fn query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    /// Gets a header value.
    pub fn get_header(&self, key: &str) -> Option<&str> {
        // Case-insensitive header lookup
        let key_lower = key.to_lowercase();
        self.headers
            .iter()
            .find(|(k, _)| k.to_lowercase() == key_lower)
            .map(|(_, v)| v.as_str())
    }

    /// Gets a query parameter.
    pub fn get_query(&self, key: &str) -> Option<&str> {
        self.query.get(key).map(String::as_str)
    }

    /// Returns the body as a string.
    pub fn body_string(&self) -> Option<String> {
        String::from_utf8(self.body.clone()).ok()
    }

    /// Returns the query parameters as form data.
    pub fn query_data(&self) -> FormData {
        let mut data = FormData::new();
        for (key, value) in &self.query {
            data.append(key.clone(), FormPart::Text(value.clone()));
        }
        data
    }

    /// Parses the body as submitted form data.
    ///
    /// Handles `application/x-www-form-urlencoded` and `multipart/form-data`
    /// bodies. Any other content type yields empty form data.
    ///
    /// # Errors
    ///
    /// Returns [`crate::RouterError::BodyParse`] if the body does not decode under its
    /// declared content type.
    pub async fn form_data(&self) -> Result<FormData> {
        let content_type = self.get_header("Content-Type").unwrap_or_default();
        let mime = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        match mime.as_str() {
            "application/x-www-form-urlencoded" => {
                let pairs: Vec<(String, String)> = serde_urlencoded::from_bytes(&self.body)?;
                Ok(pairs
                    .into_iter()
                    .map(|(key, value)| (key, FormPart::Text(value)))
                    .collect())
            }
            "multipart/form-data" => self.multipart_data(content_type).await,
            _ => Ok(FormData::new()),
        }
    }

    async fn multipart_data(&self, content_type: &str) -> Result<FormData> {
        let boundary = multer::parse_boundary(content_type)?;
        let body = Bytes::from(self.body.clone());
        let stream = stream::once(async move { Ok::<_, std::io::Error>(body) });
        let mut multipart = multer::Multipart::new(stream, boundary);

        let mut data = FormData::new();
        while let Some(field) = multipart.next_field().await? {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };
            let part = match field.file_name().map(str::to_string) {
                Some(file_name) => {
                    let part_type = field.content_type().map(ToString::to_string);
                    let bytes = field.bytes().await?;
                    FormPart::File(UploadedFile::new(file_name, part_type, bytes))
                }
                None => FormPart::Text(field.text().await?),
            };
            data.append(name, part);
        }

        Ok(data)
    }

    /// Parses query parameters from a query string.
    pub fn parse_query_string(query: &str) -> HashMap<String, String> {
        serde_urlencoded::from_str::<Vec<(String, String)>>(query)
            .map(|pairs| pairs.into_iter().collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RouterError;

    #[test]
    fn test_method_parsing() {
        assert_eq!("GET".parse::<Method>(), Ok(Method::Get));
        assert_eq!("post".parse::<Method>(), Ok(Method::Post));
        assert!("INVALID".parse::<Method>().is_err());
    }

    #[test]
    fn test_path_params() {
        let mut params = PathParams::new();
        params.insert("id", "123");
        params.insert("name", "test");

        assert_eq!(params.get("id"), Some("123"));
        assert_eq!(params.parse::<i64>("id"), Some(123));
        assert_eq!(params.get("missing"), None);
    }

    #[test]
    fn test_request_builder() {
        let req = Request::get("/users")
            .header("Content-Type", "application/json")
            .query_param("page", "1");

        assert_eq!(req.method, Method::Get);
        assert_eq!(req.path, "/users");
        assert_eq!(req.get_header("content-type"), Some("application/json"));
        assert_eq!(req.get_query("page"), Some("1"));
    }

    #[test]
    fn test_target_with_query_string() {
        let req = Request::get("/search?q=rust+lang&page=2");
        assert_eq!(req.path, "/search");
        assert_eq!(req.get_query("q"), Some("rust lang"));
        assert_eq!(req.get_query("page"), Some("2"));
        assert_eq!(req.query_data().text("page"), Some("2"));
    }

    #[test]
    fn test_query_string_parsing() {
        let query = Request::parse_query_string("name=John+Doe&age=30&city=New%20York");
        assert_eq!(query.get("name"), Some(&"John Doe".to_string()));
        assert_eq!(query.get("age"), Some(&"30".to_string()));
        assert_eq!(query.get("city"), Some(&"New York".to_string()));
    }

    #[tokio::test]
    async fn test_urlencoded_form_data() {
        let req = Request::post("/signup").form_body("name=Jo&color=%23ff0000&name=Ann");
        let data = req.form_data().await.unwrap();
        assert_eq!(data.text("color"), Some("#ff0000"));
        // The last value for a repeated name wins.
        assert_eq!(data.text("name"), Some("Ann"));
        assert_eq!(data.get_all("name").count(), 2);
    }

    #[tokio::test]
    async fn test_unknown_content_type_is_empty() {
        let req = Request::post("/signup")
            .header("Content-Type", "application/json")
            .body(r#"{"name":"Jo"}"#);
        assert!(req.form_data().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_multipart_form_data() {
        let body = "--XyZ\r\n\
            Content-Disposition: form-data; name=\"title\"\r\n\r\n\
            Holiday\r\n\
            --XyZ\r\n\
            Content-Disposition: form-data; name=\"photo\"; filename=\"beach.png\"\r\n\
            Content-Type: image/png\r\n\r\n\
            PNGDATA\r\n\
            --XyZ--\r\n";
        let req = Request::post("/upload")
            .header("Content-Type", "multipart/form-data; boundary=XyZ")
            .body(body);

        let data = req.form_data().await.unwrap();
        assert_eq!(data.text("title"), Some("Holiday"));
        let Some(FormPart::File(photo)) = data.get("photo") else {
            panic!("expected a file part");
        };
        assert_eq!(photo.file_name, "beach.png");
        assert_eq!(photo.content_type.as_deref(), Some("image/png"));
        assert_eq!(&photo.data[..], b"PNGDATA");
    }

    #[tokio::test]
    async fn test_multipart_without_boundary() {
        let req = Request::post("/upload")
            .header("Content-Type", "multipart/form-data")
            .body("garbage");
        assert!(matches!(
            req.form_data().await,
            Err(RouterError::BodyParse(_))
        ));
    }
}
