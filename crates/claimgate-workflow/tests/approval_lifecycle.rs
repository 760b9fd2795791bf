//! End-to-end lifecycle scenarios against the public crate API.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use claimgate_workflow::{
    ApprovalRequestFilter, ApprovalWorkflowService, CreateApprovalRequestInput,
    InMemoryApprovalRequestStore, InMemoryEventSink, ManualClock, RequestStatus, Urgency,
    WorkflowError,
};

fn t0() -> DateTime<Utc> {
    "2024-01-01T00:00:00Z".parse().unwrap()
}

fn engine() -> (ApprovalWorkflowService, Arc<InMemoryEventSink>, ManualClock) {
    let sink = Arc::new(InMemoryEventSink::new());
    let clock = ManualClock::new(t0());
    let service = ApprovalWorkflowService::new(
        Arc::new(InMemoryApprovalRequestStore::new()),
        sink.clone(),
        Arc::new(clock.clone()),
    );
    (service, sink, clock)
}

fn tile_cost_request(approvers: Vec<Uuid>) -> CreateApprovalRequestInput {
    CreateApprovalRequestInput {
        request_type: "cost_increase".to_string(),
        description: "Approve tile cost increase".to_string(),
        justification: None,
        amount: None,
        urgency: Urgency::Urgent,
        required_authority_level: Default::default(),
        approvers,
        requested_by: Uuid::new_v4(),
        project_id: None,
        metadata: None,
    }
}

#[tokio::test]
async fn urgent_request_decided_inside_window() {
    let (service, sink, clock) = engine();
    let u1 = Uuid::new_v4();
    let u2 = Uuid::new_v4();

    let request = service
        .create(tile_cost_request(vec![u1, u2]))
        .await
        .unwrap();
    assert_eq!(request.expires_at, "2024-01-02T00:00:00Z".parse::<DateTime<Utc>>().unwrap());

    // Decision lands twelve hours in.
    clock.set("2024-01-01T12:00:00Z".parse().unwrap());
    let approved = service.approve(request.id, u1, None).await.unwrap();
    assert_eq!(approved.status, RequestStatus::Approved);
    assert_eq!(approved.approved_by, Some(u1));

    // The second approver is too late: the decision is already made.
    let result = service.approve(request.id, u2, None).await;
    assert!(matches!(
        result,
        Err(WorkflowError::InvalidState {
            status: RequestStatus::Approved
        })
    ));

    assert_eq!(
        sink.names().await,
        vec!["request.created".to_string(), "request.approved".to_string()]
    );
}

#[tokio::test]
async fn rejection_then_escalation_on_terminal_request() {
    let (service, _, clock) = engine();
    let u1 = Uuid::new_v4();
    let u2 = Uuid::new_v4();

    let request = service
        .create(tile_cost_request(vec![u1, u2]))
        .await
        .unwrap();

    clock.set("2024-01-01T01:00:00Z".parse().unwrap());
    let rejected = service
        .reject(request.id, u2, "Budget exceeded")
        .await
        .unwrap();
    assert_eq!(rejected.status, RequestStatus::Rejected);
    assert_eq!(rejected.rejection_reason, Some("Budget exceeded".to_string()));

    // The permissive escalation path: the flag can still be raised on a
    // rejected request, without disturbing the outcome.
    let escalated = service
        .escalate(request.id, Uuid::new_v4(), "Requester disputes the decision")
        .await
        .unwrap();
    assert!(escalated.escalated);
    assert_eq!(escalated.status, RequestStatus::Rejected);
}

#[tokio::test]
async fn expiry_is_lazy_and_final() {
    let (service, _, clock) = engine();
    let u1 = Uuid::new_v4();

    let request = service.create(tile_cost_request(vec![u1])).await.unwrap();

    // One hour past the 24h urgent window.
    clock.set("2024-01-02T01:00:00Z".parse().unwrap());

    // Reads present the request as expired without any stored mutation.
    let view = service.get(request.id).await.unwrap();
    assert!(view.is_expired);
    assert_eq!(view.request.status, RequestStatus::Expired);

    // Mutations refuse with the deadline that passed.
    let result = service.approve(request.id, u1, None).await;
    assert!(matches!(
        result,
        Err(WorkflowError::Expired { expired_at }) if expired_at == request.expires_at
    ));
    let result = service.reject(request.id, u1, "too late anyway").await;
    assert!(matches!(result, Err(WorkflowError::Expired { .. })));
}

#[tokio::test]
async fn pending_queue_tracks_decisions() {
    let (service, _, _) = engine();
    let approver = Uuid::new_v4();

    let first = service
        .create(tile_cost_request(vec![approver]))
        .await
        .unwrap();
    let second = service
        .create(tile_cost_request(vec![approver]))
        .await
        .unwrap();

    assert_eq!(service.list_pending_for(approver).await.unwrap().len(), 2);

    service.approve(first.id, approver, None).await.unwrap();
    let queue = service.list_pending_for(approver).await.unwrap();
    assert_eq!(queue.len(), 1);
    assert_eq!(queue[0].request.id, second.id);

    // Escalated requests stay in the queue; they are still decidable.
    service
        .escalate(second.id, Uuid::new_v4(), "stuck")
        .await
        .unwrap();
    assert_eq!(service.list_pending_for(approver).await.unwrap().len(), 1);
}

#[tokio::test]
async fn status_filter_round_trip() {
    let (service, _, _) = engine();
    let request = service
        .create(tile_cost_request(vec![Uuid::new_v4()]))
        .await
        .unwrap();

    let views = service
        .list(&ApprovalRequestFilter {
            statuses: Some(vec![RequestStatus::Pending]),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(views.len(), 1);
    assert_eq!(views[0].request.id, request.id);
    assert!(!views[0].is_expired);
}
