//! Weather and currency lookups.

use std::io::Write;

use color_eyre::eyre::{eyre, WrapErr};
use color_eyre::Result;
use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::Value;
use url::Url;

use crate::{http, output};

/// Subset of the wttr.in `format=j1` document.
#[derive(Debug, Deserialize)]
pub struct WeatherReport {
    current_condition: Vec<CurrentCondition>,
}

#[derive(Debug, Deserialize)]
struct CurrentCondition {
    #[serde(rename = "temp_C")]
    temp_c: String,
    #[serde(rename = "FeelsLikeC")]
    feels_like_c: String,
    humidity: String,
    #[serde(rename = "windspeedKmph")]
    windspeed_kmph: String,
    #[serde(rename = "weatherDesc", default)]
    weather_desc: Vec<TextValue>,
}

#[derive(Debug, Deserialize)]
struct TextValue {
    value: String,
}

impl WeatherReport {
    /// `Metric | Value` rows for the current conditions.
    ///
    /// # Errors
    ///
    /// Returns an error if the report has no current conditions.
    pub fn rows(&self) -> Result<Vec<Vec<String>>> {
        let current = self
            .current_condition
            .first()
            .ok_or_else(|| eyre!("Weather report has no current conditions"))?;
        let description = current
            .weather_desc
            .first()
            .map_or_else(String::new, |d| d.value.clone());
        Ok(vec![
            vec!["Temperature".to_string(), format!("{} °C", current.temp_c)],
            vec!["Feels Like".to_string(), format!("{} °C", current.feels_like_c)],
            vec!["Humidity".to_string(), format!("{} %", current.humidity)],
            vec!["Wind".to_string(), format!("{} km/h", current.windspeed_kmph)],
            vec!["Weather".to_string(), description],
        ])
    }
}

/// Prints current conditions for `city`.
///
/// # Errors
///
/// Returns an error on request failure, a non-success status, or an
/// unexpected response shape.
pub fn weather(out: &mut dyn Write, client: &Client, base_url: &str, city: &str) -> Result<()> {
    let url = format!(
        "{}/{}?format=j1",
        base_url.trim_end_matches('/'),
        urlencoding::encode(city)
    );
    let report: WeatherReport = http::get_json(client, &url).wrap_err("Failed to fetch weather")?;
    write!(out, "{}", output::render_table(&["Metric", "Value"], &report.rows()?))?;
    Ok(())
}

/// Builds the `/convert` request URL with upper-cased currency codes.
///
/// # Errors
///
/// Returns an error if `base_url` is not a valid URL.
pub fn conversion_url(base_url: &str, amount: f64, from: &str, to: &str) -> Result<Url> {
    let endpoint = format!("{}/convert", base_url.trim_end_matches('/'));
    Url::parse_with_params(
        &endpoint,
        &[
            ("from", from.to_uppercase()),
            ("to", to.to_uppercase()),
            ("amount", amount.to_string()),
        ],
    )
    .wrap_err_with(|| format!("Invalid endpoint: {endpoint}"))
}

/// Converts `amount` between currencies and prints `AMOUNT FROM = RESULT TO`.
///
/// # Errors
///
/// Returns an error on request failure or when the response carries no
/// numeric `result`.
pub fn currency_convert(
    out: &mut dyn Write,
    client: &Client,
    base_url: &str,
    amount: f64,
    from: &str,
    to: &str,
) -> Result<()> {
    let url = conversion_url(base_url, amount, from, to)?;
    let data: Value = http::get_json(client, url.as_str()).wrap_err("Failed to convert currency")?;
    let result = data
        .get("result")
        .and_then(Value::as_f64)
        .ok_or_else(|| eyre!("Conversion failed."))?;
    writeln!(
        out,
        "{amount} {} = {result:.2} {}",
        from.to_uppercase(),
        to.to_uppercase()
    )?;
    Ok(())
}
