use chrono::NaiveDate;
use lasp_eve::{BASE_URL, DataClient, Dispatcher, EveClient, Level, QueryAttr, TimeRange};

fn eve_query(start: &str, end: &str) -> Vec<QueryAttr> {
    vec![
        QueryAttr::time(start, end).unwrap(),
        QueryAttr::instrument("EVE"),
        QueryAttr::level(0),
    ]
}

#[test]
fn documented_example_end_to_end() {
    let range = TimeRange::parse("2016/1/1", "2016/1/2").unwrap();
    assert_eq!(
        range.dates(),
        vec![NaiveDate::from_ymd_opt(2016, 1, 1).unwrap()]
    );

    let urls = EveClient::new().urls_for_timerange(&range);
    assert_eq!(
        urls,
        vec![format!(
            "{}/2016/20160101_EVE_L0CS_DIODES_1m.txt",
            BASE_URL.trim_end_matches('/')
        )]
    );
}

#[test]
fn dispatcher_routes_eve_level_zero() {
    let dispatcher = Dispatcher::default();
    let query = eve_query("2016/1/1", "2016/1/5");

    let client = dispatcher.client_for(&query).expect("eve client");
    assert_eq!(client.name(), "eve");
    assert_eq!(client.metadata().get("provider"), Some("LASP"));

    let resp = dispatcher.search(&query).unwrap();
    assert_eq!(resp.len(), 4);
    let days: Vec<String> = resp
        .iter()
        .map(|r| r.start_time.format("%Y%m%d").to_string())
        .collect();
    assert_eq!(days, vec!["20160101", "20160102", "20160103", "20160104"]);
    for (row, day) in resp.iter().zip(&days) {
        assert!(row.url.ends_with(&format!("/2016/{}_EVE_L0CS_DIODES_1m.txt", day)));
        assert_eq!(row.end_time - row.start_time, chrono::Duration::days(1));
    }
}

#[test]
fn dispatcher_refuses_other_levels() {
    let query = vec![
        QueryAttr::time("2016/1/1", "2016/1/2").unwrap(),
        QueryAttr::instrument("eve"),
        QueryAttr::Level(Level::Number(1.0)),
    ];
    assert!(Dispatcher::default().client_for(&query).is_none());
    assert!(Dispatcher::default().search(&query).is_err());
}

#[test]
fn metadata_is_fixed() {
    let client = EveClient::new();
    let meta = client.metadata();
    assert_eq!(meta.len(), 4);
    assert_eq!(meta.get("source"), Some("SDO"));
    assert_eq!(meta.get("provider"), Some("LASP"));
    assert_eq!(meta.get("instrument"), Some("eve"));
    assert_eq!(meta.get("phyobs"), Some("irradiance"));

    let json = serde_json::to_value(meta).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "source": "SDO",
            "provider": "LASP",
            "instrument": "eve",
            "phyobs": "irradiance"
        })
    );
}

#[test]
fn long_range_keeps_one_url_per_day() {
    let range = TimeRange::parse("2015-12-01", "2016-03-01").unwrap();
    let urls = EveClient::new().urls_for_timerange(&range);
    assert_eq!(urls.len(), 31 + 31 + 29);
    assert_eq!(urls.len(), range.day_count());
    let mut sorted = urls.clone();
    sorted.sort();
    assert_eq!(urls, sorted);
}
