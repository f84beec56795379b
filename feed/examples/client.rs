use reqwest::Client;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let client = Client::new();
    let base_url = std::env::var("API_BASE_URL").unwrap_or_else(|_| "http://127.0.0.1:3000".to_string());

    println!("📰 Testing announcements API");

    println!("\n✈️  Preflight:");
    let preflight = client
        .request(reqwest::Method::OPTIONS, format!("{}/api/announcements", base_url))
        .send()
        .await?;
    println!("Status: {}", preflight.status());
    for (name, value) in preflight.headers() {
        if name.as_str().starts_with("access-control-") {
            println!("  {}: {}", name, value.to_str().unwrap_or("?"));
        }
    }

    println!("\n📅 Today's announcements (first 2 pages):");
    let today = client
        .get(format!("{}/api/announcements", base_url))
        .query(&[("limit_pages", "2")])
        .send()
        .await?;
    println!("Status: {}", today.status());
    let today_json: serde_json::Value = today.json().await?;
    println!("Date: {}  Count: {}", today_json["date"], today_json["count"]);
    if let Some(first) = today_json["rows"].as_array().and_then(|rows| rows.first()) {
        println!("First row: {}", serde_json::to_string_pretty(first)?);
    }

    println!("\n🚫 Invalid date:");
    let invalid = client
        .get(format!("{}/api/announcements", base_url))
        .query(&[("date", "2024-02-30")])
        .send()
        .await?;
    println!("Status: {}", invalid.status());
    let invalid_json: serde_json::Value = invalid.json().await?;
    println!("Response: {}", serde_json::to_string_pretty(&invalid_json)?);

    println!("\n✅ Client test completed!");
    Ok(())
}
