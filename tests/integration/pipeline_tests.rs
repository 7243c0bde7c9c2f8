//! Pipeline integration tests
//!
//! Run the full mapping → extraction → batching → dispatch flow with the
//! HTTP transport against a mock gateway proxy.

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use bulksms_rs::{
        DeliveryStatus, Dispatcher, HttpProxyClient, MappingRejection, RowBounds, validate,
    };

    use crate::common::fixtures::{SettingsFactory, SheetFactory, text};

    fn proxy_success_body() -> serde_json::Value {
        json!({
            "success": true,
            "http_status": 200,
            "curl_error": null,
            "upstream_raw": "{\"code\":\"000\"}",
            "upstream_parsed": { "code": "000", "message": "submitted", "jobId": "J-1" },
            "upstream_code": "000"
        })
    }

    fn dispatcher_against(proxy: &MockServer) -> Dispatcher<HttpProxyClient> {
        Dispatcher::new(
            HttpProxyClient::new(format!("{}/send_sms", proxy.uri())),
            SettingsFactory::create(),
            Duration::ZERO,
        )
    }

    #[tokio::test]
    async fn three_rows_batch_of_two_produce_two_batches_and_three_log_entries() {
        let proxy = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/send_sms"))
            .respond_with(ResponseTemplate::new(200).set_body_json(proxy_success_body()))
            .expect(2)
            .mount(&proxy)
            .await;

        let header = SheetFactory::header_meta(3);
        let mapping = validate(&header, &SheetFactory::selection(), &RowBounds::default(), 2, 1)
            .expect("valid mapping");

        let mut dispatcher = dispatcher_against(&proxy);
        let summary = dispatcher
            .dispatch(&SheetFactory::rows(), &mapping)
            .await
            .expect("dispatch");

        assert_eq!(summary.batches, 2);
        assert_eq!(summary.recipients, 3);
        assert_eq!(summary.failed_batches, 0);

        let entries = dispatcher.log().entries();
        assert_eq!(entries.len(), 3);
        assert!(entries.iter().all(|e| e.status == DeliveryStatus::Success));
        assert!(entries.iter().all(|e| e.detail == "jobId:J-1 - submitted"));

        // newest first: the remainder batch's single recipient leads
        let phones: Vec<&str> = entries.iter().map(|e| e.phone.as_str()).collect();
        assert_eq!(phones, vec!["919876500", "91987651", "9198765"]);
    }

    #[tokio::test]
    async fn a_phone_column_reused_as_variable_rejects_before_any_network_call() {
        let header = SheetFactory::header_meta(3);
        let mut selection = SheetFactory::selection();
        selection.vars = vec![1];

        let result = validate(&header, &selection, &RowBounds::default(), 2, 1);

        assert_eq!(result, Err(MappingRejection::PhoneColumnReused));
        // no descriptor, so there is nothing to extract or dispatch
    }

    #[tokio::test]
    async fn upstream_balance_failure_marks_every_recipient_failed() {
        let proxy = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": false,
                "http_status": 200,
                "curl_error": null,
                "upstream_raw": "{\"code\":\"001\"}",
                "upstream_parsed": { "code": "001", "message": "insufficient balance" },
                "upstream_code": "001"
            })))
            .mount(&proxy)
            .await;

        let header = SheetFactory::header_meta(3);
        let mapping = validate(&header, &SheetFactory::selection(), &RowBounds::default(), 10, 1)
            .expect("valid mapping");

        let mut dispatcher = dispatcher_against(&proxy);
        let summary = dispatcher
            .dispatch(&SheetFactory::rows(), &mapping)
            .await
            .expect("dispatch");

        assert_eq!(summary.failed_batches, 1);
        let entries = dispatcher.log().entries();
        assert_eq!(entries.len(), 3);
        assert!(entries.iter().all(|e| e.status == DeliveryStatus::Failed));
        assert!(entries.iter().all(|e| e.detail.contains("insufficient balance")));
    }

    #[tokio::test]
    async fn a_proxy_rejection_fails_the_batch_but_not_the_operation() {
        let proxy = MockServer::start().await;
        // first batch rejected, second accepted
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "success": false,
                "error": "exceeds_max_per_request",
                "max": 10_000
            })))
            .up_to_n_times(1)
            .mount(&proxy)
            .await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(proxy_success_body()))
            .mount(&proxy)
            .await;

        let header = SheetFactory::header_meta(3);
        let mapping = validate(&header, &SheetFactory::selection(), &RowBounds::default(), 2, 1)
            .expect("valid mapping");

        let mut dispatcher = dispatcher_against(&proxy);
        let summary = dispatcher
            .dispatch(&SheetFactory::rows(), &mapping)
            .await
            .expect("dispatch");

        assert_eq!(summary.batches, 2);
        assert_eq!(summary.failed_batches, 1);

        let entries = dispatcher.log().entries();
        assert_eq!(entries.len(), 3);
        // newest first: the successful remainder batch leads
        assert_eq!(entries[0].status, DeliveryStatus::Success);
        assert_eq!(entries[1].status, DeliveryStatus::Failed);
        assert!(entries[1].detail.contains("exceeds_max_per_request"));
    }

    #[tokio::test]
    async fn row_bounds_narrow_the_dispatched_recipients() {
        let proxy = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(proxy_success_body()))
            .expect(1)
            .mount(&proxy)
            .await;

        let header = SheetFactory::header_meta(3);
        // data rows sit at sheet rows 2..=4; keep only sheet row 3
        let bounds = RowBounds {
            start: Some(3),
            end: Some(3),
        };
        let mapping = validate(&header, &SheetFactory::selection(), &bounds, 10, 1)
            .expect("valid mapping");

        let mut dispatcher = dispatcher_against(&proxy);
        let summary = dispatcher
            .dispatch(&SheetFactory::rows(), &mapping)
            .await
            .expect("dispatch");

        assert_eq!(summary.recipients, 1);
        assert_eq!(dispatcher.log().entries()[0].phone, "91987651");
    }

    #[tokio::test]
    async fn duplicate_rows_collapse_before_batching() {
        let proxy = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(proxy_success_body()))
            .expect(1)
            .mount(&proxy)
            .await;

        let rows = vec![
            vec![text("Ann"), text("91-98765"), text("first")],
            vec![text("Ann again"), text("919 8765"), text("second")],
            vec![text("Bob"), text("0091987651"), text("third")],
        ];
        let header = SheetFactory::header_meta(3);
        let mapping = validate(&header, &SheetFactory::selection(), &RowBounds::default(), 10, 1)
            .expect("valid mapping");

        let mut dispatcher = dispatcher_against(&proxy);
        let summary = dispatcher.dispatch(&rows, &mapping).await.expect("dispatch");

        assert_eq!(summary.recipients, 2);
    }

    #[tokio::test]
    async fn the_log_clears_only_on_explicit_reset() {
        let proxy = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(proxy_success_body()))
            .mount(&proxy)
            .await;

        let header = SheetFactory::header_meta(3);
        let mapping = validate(&header, &SheetFactory::selection(), &RowBounds::default(), 10, 1)
            .expect("valid mapping");

        let mut dispatcher = dispatcher_against(&proxy);
        dispatcher
            .dispatch(&SheetFactory::rows(), &mapping)
            .await
            .expect("dispatch");

        let log = dispatcher.log();
        assert_eq!(log.len(), 3);

        // a second run prepends on top of the first
        dispatcher
            .dispatch(&SheetFactory::rows(), &mapping)
            .await
            .expect("dispatch");
        assert_eq!(log.len(), 6);

        // explicit reset, e.g. when the mapping is discarded
        log.clear();
        assert!(log.is_empty());
    }
}
