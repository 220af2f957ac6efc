mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

fn ada() -> Value {
    json!({
        "firstName": "Ada",
        "lastName": "Lovelace",
        "email": "ada@example.com",
        "favoriteColor": "green",
        "birthday": "1815-12-10"
    })
}

#[tokio::test]
async fn contact_lifecycle() -> Result<()> {
    let server = common::start_server().await?;
    let client = common::client();

    let res = client.post(server.url("/contacts")).json(&ada()).send().await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let id = res.json::<Value>().await?["id"]
        .as_str()
        .map(str::to_string)
        .expect("id in create response");
    assert_eq!(id.len(), 24);

    let listed = client.get(server.url("/contacts")).send().await?.json::<Value>().await?;
    assert!(
        listed.as_array().unwrap().iter().any(|doc| doc["_id"] == id.as_str()),
        "new contact missing from list: {}",
        listed
    );

    let mut changed = ada();
    changed["favoriteColor"] = json!("purple");
    let res = client.put(server.url(&format!("/contacts/{}", id))).json(&changed).send().await?;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);
    assert!(res.bytes().await?.is_empty());

    let fetched = client
        .get(server.url(&format!("/contacts/{}", id)))
        .send()
        .await?
        .json::<Value>()
        .await?;
    assert_eq!(fetched["favoriteColor"], "purple");
    assert_eq!(fetched["_id"], id.as_str());

    let res = client.delete(server.url(&format!("/contacts/{}", id))).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.json::<Value>().await?["message"], "Contact deleted successfully.");

    let res = client.get(server.url(&format!("/contacts/{}", id))).send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn incomplete_contact_is_rejected() -> Result<()> {
    let server = common::start_server().await?;

    let res = common::client()
        .post(server.url("/contacts"))
        .json(&json!({"firstName": "Ada"}))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body = res.json::<Value>().await?;
    assert_eq!(
        body["message"],
        "All fields (firstName, lastName, email, favoriteColor, birthday) are required."
    );
    Ok(())
}

#[tokio::test]
async fn malformed_ids_are_bad_requests() -> Result<()> {
    let server = common::start_server().await?;

    let res = common::client().get(server.url("/contacts/not-an-id")).send().await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(res.json::<Value>().await?["message"], "Invalid ID format");
    Ok(())
}
