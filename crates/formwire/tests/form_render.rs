//! Tests for rendering built forms.

mod common;
use common::silent;

use chrono::NaiveDate;
use formwire::{
    CheckboxOptions, DateOptions, FieldValue, FileOptions, FormBuilder, FormError, NumberOptions,
    RangeOptions, RenderOptions, SelectOptions, TextOptions,
};
use formwire_router::Method;

#[test]
fn render_multiple_fields_with_nested_path() {
    let form = silent(FormBuilder::new("/users/:userId/posts/:postId/edit"))
        .add_text("title", "Title", TextOptions::new())
        .add_select(
            "category",
            "Category",
            SelectOptions::new([("tech", "Technology"), ("lifestyle", "Lifestyle")]),
        )
        .build()
        .unwrap();

    let html = form
        .render(
            &RenderOptions::new()
                .url_param("userId", "123")
                .url_param("postId", "456"),
        )
        .unwrap();
    assert!(html.contains(r#"<form action="/users/123/posts/456/edit" method="POST">"#));
    assert!(html.contains(r#"name="title""#));
    assert!(html.contains(r#"name="category""#));
    assert!(html.ends_with(r#"<button type="submit">Submit</button></form>"#));
}

#[test]
fn render_current_values() {
    let form = silent(FormBuilder::new("/test/:id"))
        .add_text("name", "Name", TextOptions::new())
        .add_email("email", "Email", TextOptions::new())
        .add_number("age", "Age", NumberOptions::new())
        .add_date("birthdate", "Birth Date", DateOptions::new())
        .add_checkbox("subscribe", "Subscribe", CheckboxOptions::new())
        .add_select(
            "country",
            "Country",
            SelectOptions::new([("us", "USA"), ("ca", "Canada")]),
        )
        .build()
        .unwrap();

    let html = form
        .render(
            &RenderOptions::new()
                .url_param("id", "123")
                .value("name", "John Doe")
                .value("email", "john@example.com")
                .value("age", 30)
                .value("birthdate", "1990-01-01")
                .value("subscribe", true)
                .value("country", "ca"),
        )
        .unwrap();

    assert!(html.contains(r#"value="John Doe""#));
    assert!(html.contains(r#"value="john@example.com""#));
    assert!(html.contains(r#"value="30""#));
    assert!(html.contains(r#"value="1990-01-01""#));
    assert!(html.contains(" checked"));
    assert!(html.contains(r#"<option value="ca" selected>"#));
}

#[test]
fn render_constrained_path_parameter() {
    let form = silent(FormBuilder::new(r"/items/:id{\d+}/edit"))
        .add_text("name", "Item Name", TextOptions::new())
        .build()
        .unwrap();

    let html = form
        .render(&RenderOptions::new().url_param("id", "123"))
        .unwrap();
    assert!(html.contains(r#"<form action="/items/123/edit" method="POST">"#));

    let err = form
        .render(&RenderOptions::new().url_param("id", "abc"))
        .unwrap_err();
    assert_eq!(err.to_string(), "Invalid values for path parameters: id");
}

#[test]
fn render_reports_every_missing_parameter() {
    let form = silent(FormBuilder::new("/users/:userId/posts/:postId/comments/:commentId"))
        .build()
        .unwrap();

    let err = form
        .render(&RenderOptions::new().url_param("postId", "1"))
        .unwrap_err();
    assert!(
        matches!(err, FormError::MissingPathParameters(ref names) if names == &["userId", "commentId"])
    );
}

#[test]
fn render_reports_every_invalid_parameter() {
    let form = silent(FormBuilder::new(
        r"/teams/:team{[a-z]+}/users/:id{\d+}/posts/:slug",
    ))
    .build()
    .unwrap();

    let err = form
        .render(
            &RenderOptions::new()
                .url_param("team", "Core")
                .url_param("id", "abc")
                .url_param("slug", "hello"),
        )
        .unwrap_err();
    assert!(
        matches!(err, FormError::InvalidPathParameters(ref names) if names == &["team", "id"])
    );
    assert_eq!(
        err.to_string(),
        "Invalid values for path parameters: team, id"
    );
}

#[test]
fn render_percent_encodes_parameters() {
    let form = silent(FormBuilder::new("/tags/:tag")).build().unwrap();
    let html = form
        .render(&RenderOptions::new().url_param("tag", "rust & wasm"))
        .unwrap();
    assert!(html.contains(r#"action="/tags/rust%20%26%20wasm""#));
}

#[test]
fn render_get_method() {
    let form = silent(FormBuilder::new("/search").method(Method::Get))
        .add_text("query", "Search Query", TextOptions::new())
        .build()
        .unwrap();
    let html = form.render(&RenderOptions::new()).unwrap();
    assert!(html.starts_with(r#"<form action="/search" method="GET">"#));
}

#[test]
fn render_every_kind() {
    let form = silent(FormBuilder::new("/profile"))
        .add_url("site", "Website", TextOptions::new().optional().placeholder("https://"))
        .add_password("pw", "Password", TextOptions::new().min_length(8))
        .add_tel("phone", "Phone", TextOptions::new().pattern(r"\d{3}-\d{4}"))
        .add_range("volume", "Volume", RangeOptions::new().min(0.0).max(100.0).integer())
        .add_file("avatar", "Avatar", FileOptions::new().accept("image/*"))
        .add_color("favcolor", "Favorite Color")
        .add_hidden("csrf")
        .build()
        .unwrap();

    let html = form
        .render(
            &RenderOptions::new()
                .value("pw", "hunter22")
                .value("volume", 40)
                .value("favcolor", "#00ff00")
                .value("csrf", "abc"),
        )
        .unwrap();

    assert_eq!(
        html,
        concat!(
            r#"<form action="/profile" method="POST" enctype="multipart/form-data">"#,
            r#"<label>Website:<input type="url" name="site" placeholder="https://"></label>"#,
            r#"<label>Password:<input type="password" name="pw" minlength="8" required></label>"#,
            r#"<label>Phone:<input type="tel" name="phone" pattern="\d{3}-\d{4}" required></label>"#,
            r#"<label>Volume:<input type="range" name="volume" step="1" min="0" max="100" required value="40"></label>"#,
            r#"<label>Avatar:<input type="file" name="avatar" required accept="image/*"></label>"#,
            r##"<label>Favorite Color:<input type="color" name="favcolor" required value="#00ff00"></label>"##,
            r#"<input type="hidden" name="csrf" value="abc">"#,
            r#"<button type="submit">Submit</button></form>"#
        )
    );
}

#[test]
fn render_date_bounds_as_calendar_dates() {
    let form = silent(FormBuilder::new("/book"))
        .add_date(
            "day",
            "Day",
            DateOptions::new()
                .min_date(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
                .max_date(NaiveDate::from_ymd_opt(2024, 12, 31).unwrap()),
        )
        .build()
        .unwrap();
    let html = form
        .render(&RenderOptions::new().value(
            "day",
            FieldValue::from(NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()),
        ))
        .unwrap();
    assert!(html.contains(
        r#"<input type="date" name="day" min="2024-01-01" max="2024-12-31" required value="2024-06-15">"#
    ));
}

#[test]
fn render_rejects_unsupported_values() {
    let form = silent(FormBuilder::new("/x"))
        .add_number("age", "Age", NumberOptions::new())
        .build()
        .unwrap();
    let err = form
        .render(&RenderOptions::new().value("age", vec![1, 2]))
        .unwrap_err();
    assert!(matches!(err, FormError::UnsupportedValueType { ref field, .. } if field == "age"));
}

#[test]
fn render_is_repeatable() {
    let form = silent(FormBuilder::new("/x"))
        .add_text("a", "A", TextOptions::new())
        .build()
        .unwrap();
    let options = RenderOptions::new();
    assert_eq!(form.render(&options).unwrap(), form.render(&options).unwrap());
}
