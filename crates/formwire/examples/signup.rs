//! Signup form demo.
//!
//! Serves a signup form page, then replays two submissions through the
//! router: one rejected, one accepted.
//!
//! Run with `cargo run -p formwire --example signup`.

use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use formwire::{
    CheckboxOptions, DateOptions, FormBuilder, NumberOptions, RenderOptions, SelectOptions,
    TextOptions,
};
use formwire_router::{Request, Response, Router};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::DEBUG)
        .with_target(false)
        .without_time()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let users: Arc<Mutex<Vec<String>>> = Arc::default();
    let store = Arc::clone(&users);

    let form = FormBuilder::new(r"/teams/:team{[a-z]+}/signup")
        .add_text("name", "Name", TextOptions::new().min_length(2).max_length(50))
        .add_email("email", "Email", TextOptions::new().placeholder("you@example.com"))
        .add_number("age", "Age", NumberOptions::new().min(18.0).integer())
        .add_date(
            "birthdate",
            "Birth Date",
            DateOptions::new()
                .optional()
                .min_date(NaiveDate::from_ymd_opt(1900, 1, 1).ok_or("bad date")?),
        )
        .add_select(
            "plan",
            "Plan",
            SelectOptions::new([("free", "Free"), ("pro", "Pro")]).placeholder("Choose a plan"),
        )
        .add_checkbox("terms", "I accept the terms", CheckboxOptions::new())
        .side_effect(move |_req, data| {
            let store = Arc::clone(&store);
            async move {
                let name = data.text("name").unwrap_or_default().to_string();
                store.lock().map_err(|e| e.to_string())?.push(name);
                Ok(())
            }
        })
        .on_success(|_req| async { Response::redirect("/welcome") })
        .on_error(|_req, err| async move {
            Response::unprocessable_entity().body(err.to_string())
        })
        .build()?;

    let page = form.clone();
    let mut router = Router::new().get(form.path_template(), move |req: Request| {
        let page = page.clone();
        async move {
            let team = req.params.get("team").unwrap_or_default();
            match page.render(&RenderOptions::new().url_param("team", team)) {
                Ok(html) => Response::html(html),
                Err(_) => Response::not_found(),
            }
        }
    });
    form.register_route(&mut router)?;

    let page = router.handle(Request::get("/teams/rustaceans/signup")).await;
    println!("{}\n", page.body_string().unwrap_or_default());

    for body in [
        "name=J&email=nope&age=17&plan=gold",
        "name=Jo&email=jo@example.com&age=18&plan=pro&terms=on",
    ] {
        let res = router
            .handle(Request::post("/teams/rustaceans/signup").form_body(body))
            .await;
        info!(
            status = res.status,
            body = %res.body_string().unwrap_or_default(),
            "Submitted"
        );
    }

    let stored = users.lock().map_err(|e| e.to_string())?.clone();
    info!(users = ?stored, "Stored users");
    Ok(())
}
