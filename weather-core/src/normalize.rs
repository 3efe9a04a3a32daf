//! Reshapes the provider's nested arrays into a [`WeatherReport`].

use crate::{
    error::WeatherError,
    model::{CurrentConditions, DailyForecastEntry, NOT_AVAILABLE, Reading, WeatherReport},
    provider::forecast::{CurrentWeather, DailySeries, ForecastPayload, HourlySeries},
};
use serde_json::Number;

/// Turn a forecast payload into the client-facing report.
///
/// `humidity_sentinel` replaces humidity when no hourly sample exists; every
/// other missing current field becomes [`NOT_AVAILABLE`].
pub fn build_report(
    city: &str,
    payload: ForecastPayload,
    humidity_sentinel: &'static str,
) -> Result<WeatherReport, WeatherError> {
    let current = payload
        .current_weather
        .ok_or(WeatherError::IncompleteForecast("current_weather"))?;
    let daily = payload.daily.ok_or(WeatherError::IncompleteForecast("daily"))?;

    let humidity = first_humidity(payload.hourly.as_ref());

    Ok(WeatherReport {
        city: city.to_string(),
        current: current_conditions(current, humidity, humidity_sentinel),
        forecast: forecast_entries(daily)?,
    })
}

/// First hourly humidity sample of the day, regardless of the current hour.
fn first_humidity(hourly: Option<&HourlySeries>) -> Option<Number> {
    hourly?.relative_humidity_2m.as_ref()?.first()?.clone()
}

fn current_conditions(
    current: CurrentWeather,
    humidity: Option<Number>,
    humidity_sentinel: &'static str,
) -> CurrentConditions {
    CurrentConditions {
        temperature: Reading::or_sentinel(current.temperature, NOT_AVAILABLE),
        windspeed: Reading::or_sentinel(current.windspeed, NOT_AVAILABLE),
        weathercode: Reading::or_sentinel(current.weathercode, NOT_AVAILABLE),
        time: Reading::or_sentinel(current.time, NOT_AVAILABLE),
        humidity: Reading::or_sentinel(humidity, humidity_sentinel),
        pressure: Reading::or_sentinel(current.pressure, NOT_AVAILABLE),
    }
}

fn forecast_entries(daily: DailySeries) -> Result<Vec<DailyForecastEntry>, WeatherError> {
    let dates = daily.time.ok_or(WeatherError::IncompleteForecast("daily.time"))?;
    let days = dates.len();

    let max_temp = aligned("temperature_2m_max", daily.temperature_2m_max, days)?;
    let min_temp = aligned("temperature_2m_min", daily.temperature_2m_min, days)?;
    let precipitation = aligned("precipitation_sum", daily.precipitation_sum, days)?;
    let uv_index = aligned("uv_index_max", daily.uv_index_max, days)?;
    let sunrise = aligned("sunrise", daily.sunrise, days)?;
    let sunset = aligned("sunset", daily.sunset, days)?;

    let entries = dates
        .into_iter()
        .zip(max_temp)
        .zip(min_temp)
        .zip(precipitation)
        .zip(uv_index)
        .zip(sunrise)
        .zip(sunset)
        .map(
            |((((((date, max_temp), min_temp), precipitation), uv_index), sunrise), sunset)| {
                DailyForecastEntry {
                    date,
                    max_temp,
                    min_temp,
                    precipitation,
                    uv_index,
                    sunrise,
                    sunset,
                }
            },
        )
        .collect();

    Ok(entries)
}

/// Every daily series must hold exactly one value per date.
fn aligned<T>(field: &'static str, values: Vec<T>, days: usize) -> Result<Vec<T>, WeatherError> {
    if values.len() != days {
        return Err(WeatherError::MisalignedForecast { field, expected: days, actual: values.len() });
    }
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(value: serde_json::Value) -> ForecastPayload {
        serde_json::from_value(value).expect("fixture should deserialize")
    }

    fn full_payload() -> ForecastPayload {
        payload(json!({
            "current_weather": {
                "temperature": 17.4,
                "windspeed": 11.2,
                "weathercode": 2,
                "time": "2024-05-01T12:00"
            },
            "daily": {
                "time": ["2024-05-01", "2024-05-02", "2024-05-03"],
                "temperature_2m_max": [19.1, 21.0, 18.3],
                "temperature_2m_min": [9.4, 10.2, 8.8],
                "precipitation_sum": [0.0, null, 4.2],
                "uv_index_max": [5.1, 6.0, 3.2],
                "sunrise": ["2024-05-01T06:30", "2024-05-02T06:28", "2024-05-03T06:27"],
                "sunset": ["2024-05-01T21:05", "2024-05-02T21:06", "2024-05-03T21:08"]
            },
            "hourly": { "relative_humidity_2m": [81, 79, 77] }
        }))
    }

    #[test]
    fn forecast_follows_daily_time_order() {
        let report = build_report("Paris", full_payload(), NOT_AVAILABLE).unwrap();

        let dates: Vec<_> = report.forecast.iter().map(|d| d.date.as_str()).collect();
        assert_eq!(dates, ["2024-05-01", "2024-05-02", "2024-05-03"]);
        assert_eq!(report.forecast[1].precipitation, None);
        assert_eq!(report.forecast[2].sunset.as_deref(), Some("2024-05-03T21:08"));
    }

    #[test]
    fn current_values_are_verbatim() {
        let report = build_report("Paris", full_payload(), NOT_AVAILABLE).unwrap();
        let json = serde_json::to_value(&report.current).unwrap();

        assert_eq!(json["temperature"], json!(17.4));
        assert_eq!(json["weathercode"], json!(2));
        assert_eq!(json["humidity"], json!(81));
        assert_eq!(json["pressure"], json!("N/A"));
    }

    #[test]
    fn humidity_uses_profile_sentinel_when_hourly_missing() {
        let mut p = full_payload();
        p.hourly = None;
        let report = build_report("Paris", p, "Data not available").unwrap();
        assert_eq!(report.current.humidity, Reading::Unavailable("Data not available"));
        assert_eq!(report.current.pressure, Reading::Unavailable(NOT_AVAILABLE));
    }

    #[test]
    fn humidity_sentinel_for_empty_or_null_first_sample() {
        let mut p = full_payload();
        p.hourly = Some(HourlySeries { relative_humidity_2m: Some(vec![]) });
        let report = build_report("Paris", p, NOT_AVAILABLE).unwrap();
        assert!(!report.current.humidity.is_available());

        let mut p = full_payload();
        p.hourly = Some(HourlySeries {
            relative_humidity_2m: Some(vec![None, Some(Number::from(70))]),
        });
        let report = build_report("Paris", p, NOT_AVAILABLE).unwrap();
        assert!(!report.current.humidity.is_available());
    }

    #[test]
    fn missing_sections_are_incomplete() {
        let mut p = full_payload();
        p.daily = None;
        let err = build_report("Paris", p, NOT_AVAILABLE).unwrap_err();
        assert!(matches!(err, WeatherError::IncompleteForecast("daily")));

        let mut p = full_payload();
        p.current_weather = None;
        let err = build_report("Paris", p, NOT_AVAILABLE).unwrap_err();
        assert!(matches!(err, WeatherError::IncompleteForecast("current_weather")));
    }

    #[test]
    fn short_daily_series_is_rejected() {
        let mut p = full_payload();
        if let Some(daily) = p.daily.as_mut() {
            daily.sunset.pop();
        }
        let err = build_report("Paris", p, NOT_AVAILABLE).unwrap_err();
        assert!(matches!(
            err,
            WeatherError::MisalignedForecast { field: "sunset", expected: 3, actual: 2 }
        ));
    }

    #[test]
    fn long_daily_series_is_rejected() {
        let mut p = full_payload();
        if let Some(daily) = p.daily.as_mut() {
            daily.uv_index_max.push(Some(Number::from(4)));
        }
        let err = build_report("Paris", p, NOT_AVAILABLE).unwrap_err();
        assert!(matches!(
            err,
            WeatherError::MisalignedForecast { field: "uv_index_max", expected: 3, actual: 4 }
        ));
    }

    #[test]
    fn daily_without_time_is_incomplete() {
        let p = payload(json!({
            "current_weather": { "temperature": 3 },
            "daily": { "temperature_2m_max": [1, 2], "sunrise": ["a", "b"] }
        }));
        let err = build_report("Paris", p, NOT_AVAILABLE).unwrap_err();
        assert!(matches!(err, WeatherError::IncompleteForecast("daily.time")));
        assert_eq!(err.status_code(), 500);
    }

    #[test]
    fn values_without_dates_are_misaligned() {
        let p = payload(json!({
            "current_weather": { "temperature": 3 },
            "daily": { "time": [], "temperature_2m_max": [1, 2] }
        }));
        let err = build_report("Paris", p, NOT_AVAILABLE).unwrap_err();
        assert!(matches!(
            err,
            WeatherError::MisalignedForecast { field: "temperature_2m_max", expected: 0, actual: 2 }
        ));
    }

    #[test]
    fn empty_current_weather_is_all_sentinels() {
        let report = build_report(
            "Oslo",
            payload(json!({ "current_weather": {}, "daily": { "time": [] } })),
            NOT_AVAILABLE,
        )
        .unwrap();

        assert!(report.forecast.is_empty());
        let json = serde_json::to_value(&report.current).unwrap();
        for field in ["temperature", "windspeed", "weathercode", "time", "humidity", "pressure"] {
            assert_eq!(json[field], json!("N/A"), "field {field}");
        }
    }
}
