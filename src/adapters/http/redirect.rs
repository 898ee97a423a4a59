use actix_web::{HttpResponse, http::header::HeaderMap};

/// Whether the request was issued by htmx
pub fn is_htmx(headers: &HeaderMap) -> bool {
  headers
    .get("HX-Request")
    .and_then(|value| value.to_str().ok())
    .is_some_and(|value| value == "true")
}

/// Navigates the browser to `location`
///
/// htmx requests get an `HX-Redirect` so the whole page changes instead of
/// the swap target; plain requests get a `302 Found`.
pub fn redirect(headers: &HeaderMap, location: &str) -> HttpResponse {
  if is_htmx(headers) {
    HttpResponse::Ok()
      .insert_header(("HX-Redirect", location))
      .finish()
  } else {
    HttpResponse::Found()
      .insert_header(("Location", location))
      .finish()
  }
}
