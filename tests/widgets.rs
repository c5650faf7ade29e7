mod common;

use std::time::Duration;

use society_site::SiteConfig;
use society_site::countdown::CountdownState;
use society_site::render::{Stylesheet, render_page};
use society_site::shell::{App, PageState, ShellEvent};
use society_site::store::MemoryStore;
use url::Url;

/// Nothing listens here, so the feed fetch fails fast and falls back.
fn unreachable_feed() -> Url {
    Url::parse("http://127.0.0.1:1/feed.xml").unwrap()
}

fn countdown(app: &App<MemoryStore>) -> CountdownState {
    match app.shell().page() {
        PageState::Home(home) => home.countdown.as_ref().expect("countdown mounted").state(),
        _ => panic!("not on the home view"),
    }
}

#[tokio::test(start_paused = true)]
async fn countdown_reports_ended_only_after_target() {
    let config = SiteConfig {
        feed_url: unreachable_feed(),
        countdown_target: Some(common::base_time() + chrono::Duration::seconds(3)),
        ..SiteConfig::default()
    };
    let mut app = common::start(config, "/home");
    let started = tokio::time::Instant::now();
    assert_eq!(countdown(&app).display(), "00:00:03");

    loop {
        app.step().await.expect("event queue open");
        let state = countdown(&app);
        if state.ended {
            assert!(started.elapsed() > Duration::from_secs(3));
            assert_eq!(state, CountdownState::ENDED);
            break;
        }
        assert!(started.elapsed() <= Duration::from_secs(3));
    }

    let html = render_page(&app.shell().view(), Stylesheet::Inline(""));
    assert!(html.contains(">ENDED<"));
}

#[tokio::test(start_paused = true)]
async fn past_target_is_ended_immediately() {
    let config = SiteConfig {
        feed_url: unreachable_feed(),
        countdown_target: Some(common::base_time() - chrono::Duration::days(30)),
        ..SiteConfig::default()
    };
    let app = common::start(config, "/home");
    assert_eq!(countdown(&app), CountdownState::ENDED);
}

#[tokio::test(start_paused = true)]
async fn leaving_home_cancels_the_ticker() {
    let config = SiteConfig {
        feed_url: unreachable_feed(),
        countdown_target: Some(common::base_time() + chrono::Duration::hours(1)),
        ..SiteConfig::default()
    };
    let mut app = common::start(config, "/home");

    loop {
        app.step().await.expect("event queue open");
        if let PageState::Home(home) = app.shell().page() {
            if !home.feed.is_loading() {
                break;
            }
        }
    }
    while app.try_step().is_some() {}

    assert!(app.dispatch(ShellEvent::Navigate("/about".to_string())));
    tokio::time::sleep(Duration::from_secs(5)).await;

    // Only the new view's loading timer; no countdown ticks.
    assert_eq!(app.try_step(), Some(true));
    assert_eq!(app.try_step(), None);
}

#[tokio::test(start_paused = true)]
async fn no_target_means_no_countdown() {
    let config = SiteConfig {
        feed_url: unreachable_feed(),
        ..SiteConfig::default()
    };
    let app = common::start(config, "/home");
    let PageState::Home(home) = app.shell().page() else {
        panic!("not on the home view");
    };
    assert!(home.countdown.is_none());
    let html = render_page(&app.shell().view(), Stylesheet::Inline(""));
    assert!(!html.contains("id=\"countdown\""));
}
