mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

fn arrival() -> Value {
    json!({
        "title": "Arrival",
        "director": "Denis Villeneuve",
        "genre": "Science Fiction",
        "releaseYear": 2016,
        "rating": 7.9,
        "watched": false
    })
}

#[tokio::test]
async fn movie_lifecycle() -> Result<()> {
    let server = common::start_server().await?;
    let client = common::client();

    let res = client.post(server.url("/movies")).json(&arrival()).send().await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let created = res.json::<Value>().await?;
    assert_eq!(created["message"], "Movie added");
    assert_eq!(created["movie"]["title"], "Arrival");
    let id = created["id"].as_str().expect("id").to_string();

    let mut watched = arrival();
    watched["watched"] = json!(true);
    let res = client.put(server.url(&format!("/movies/{}", id))).json(&watched).send().await?;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let fetched = client
        .get(server.url(&format!("/movies/{}", id)))
        .send()
        .await?
        .json::<Value>()
        .await?;
    assert_eq!(fetched["watched"], true);
    assert_eq!(fetched["releaseYear"], 2016);

    let res = client.delete(server.url(&format!("/movies/{}", id))).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.json::<Value>().await?["message"], "Movie deleted");
    Ok(())
}

#[tokio::test]
async fn wrongly_typed_movie_is_rejected() -> Result<()> {
    let server = common::start_server().await?;

    let mut movie = arrival();
    movie["releaseYear"] = json!("2016");
    let res = common::client().post(server.url("/movies")).json(&movie).send().await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn updating_unknown_movie_is_not_found() -> Result<()> {
    let server = common::start_server().await?;

    let res = common::client()
        .put(server.url("/movies/000000000000000000000000"))
        .json(&arrival())
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(res.json::<Value>().await?["message"], "Movie not found");
    Ok(())
}
