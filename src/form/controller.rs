use std::cell::Cell;

use log::{debug, error, info};

use super::status::{StatusMessage, CONNECTION_FAILURE, GENERIC_FAILURE};
use super::transport::{check_response, FormTransport, SubmitError};
use super::validation::{error_summary, validate, SignupFields};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Validating,
    Invalid,
    Submitting,
    Success,
    NetworkError,
    ServerError,
}

/// Access to the signup form's inputs and its status line.
pub trait FormView {
    fn read_fields(&self) -> SignupFields;
    fn show_status(&self, status: &StatusMessage);
    /// Restores every input to the value it had when the page loaded.
    fn reset(&self);
    /// Disables the submit controls while a request is in flight.
    fn set_busy(&self, busy: bool);
}

pub struct SubmissionController<V, T> {
    view: V,
    transport: T,
    state: Cell<SubmissionState>,
}

impl<V: FormView, T: FormTransport> SubmissionController<V, T> {
    pub fn new(view: V, transport: T) -> Self {
        Self { view, transport, state: Cell::new(SubmissionState::Idle) }
    }

    pub fn state(&self) -> SubmissionState {
        self.state.get()
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Runs one submit attempt and returns the state it ended in.
    ///
    /// An attempt made while a request is still pending is dropped and
    /// reports `Submitting`.
    pub async fn submit(&self) -> SubmissionState {
        if self.state.get() == SubmissionState::Submitting {
            debug!("submit ignored, previous signup still in flight");
            return SubmissionState::Submitting;
        }

        self.state.set(SubmissionState::Validating);
        let fields = self.view.read_fields().trimmed();
        let errors = validate(&fields);
        if !errors.is_empty() {
            debug!("signup rejected by validation: {:?}", errors);
            self.view.show_status(&StatusMessage::error(error_summary(&errors)));
            return self.finish(SubmissionState::Invalid);
        }

        self.state.set(SubmissionState::Submitting);
        self.view.show_status(&StatusMessage::sending());
        self.view.set_busy(true);

        let result = match self.transport.submit().await {
            Ok(response) => check_response(&response),
            Err(e) => Err(SubmitError::from(e)),
        };
        self.view.set_busy(false);

        match result {
            Ok(()) => {
                info!("signup accepted");
                self.view.show_status(&StatusMessage::thank_you(&fields.name));
                self.view.reset();
                self.finish(SubmissionState::Success)
            }
            Err(SubmitError::Network(e)) => {
                error!("Erro de envio: {}", e);
                self.view.show_status(&StatusMessage::error(CONNECTION_FAILURE));
                self.finish(SubmissionState::NetworkError)
            }
            Err(e @ SubmitError::ServerRejection(_)) => {
                info!("signup rejected by backend: {}", e);
                self.view.show_status(&StatusMessage::error(e.to_string()));
                self.finish(SubmissionState::ServerError)
            }
            Err(e @ SubmitError::ServerRejectionOpaque { .. }) => {
                info!("{}", e);
                self.view.show_status(&StatusMessage::error(GENERIC_FAILURE));
                self.finish(SubmissionState::ServerError)
            }
        }
    }

    fn finish(&self, outcome: SubmissionState) -> SubmissionState {
        self.state.set(outcome);
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::status::StatusKind;
    use crate::form::transport::{error_response, BackendResponse, TransportError};
    use async_trait::async_trait;
    use futures::channel::oneshot;
    use futures::executor::block_on;
    use std::cell::RefCell;

    #[derive(Default)]
    struct FakeForm {
        fields: RefCell<SignupFields>,
        status: RefCell<Option<StatusMessage>>,
        busy_log: RefCell<Vec<bool>>,
    }

    impl FakeForm {
        fn filled(name: &str, email: &str, phone: &str) -> Self {
            let form = Self::default();
            *form.fields.borrow_mut() = SignupFields {
                name: name.into(),
                email: email.into(),
                phone: phone.into(),
            };
            form
        }

        fn status(&self) -> StatusMessage {
            self.status.borrow().clone().expect("status was set")
        }
    }

    impl FormView for FakeForm {
        fn read_fields(&self) -> SignupFields {
            self.fields.borrow().clone()
        }
        fn show_status(&self, status: &StatusMessage) {
            *self.status.borrow_mut() = Some(status.clone());
        }
        fn reset(&self) {
            *self.fields.borrow_mut() = SignupFields::default();
        }
        fn set_busy(&self, busy: bool) {
            self.busy_log.borrow_mut().push(busy);
        }
    }

    struct CannedTransport {
        reply: Result<BackendResponse, TransportError>,
        calls: Cell<usize>,
    }

    impl CannedTransport {
        fn replying(status: u16, body: &str) -> Self {
            Self {
                reply: Ok(BackendResponse { status, body: body.to_string() }),
                calls: Cell::new(0),
            }
        }

        fn failing() -> Self {
            Self {
                reply: Err(TransportError("Failed to fetch".to_string())),
                calls: Cell::new(0),
            }
        }
    }

    #[async_trait(?Send)]
    impl FormTransport for CannedTransport {
        async fn submit(&self) -> Result<BackendResponse, TransportError> {
            self.calls.set(self.calls.get() + 1);
            self.reply.clone()
        }
    }

    fn controller(
        form: FakeForm,
        transport: CannedTransport,
    ) -> SubmissionController<FakeForm, CannedTransport> {
        SubmissionController::new(form, transport)
    }

    #[test]
    fn empty_name_blocks_request() {
        let c = controller(FakeForm::filled("", "a@b.com", ""), CannedTransport::replying(200, ""));

        assert_eq!(block_on(c.submit()), SubmissionState::Invalid);
        let status = c.view().status();
        assert!(status.text.contains("O campo Nome é obrigatório."));
        assert_eq!(status.kind, StatusKind::Error);
        assert_eq!(c.transport().calls.get(), 0);
    }

    #[test]
    fn invalid_email_is_reported() {
        let c = controller(
            FakeForm::filled("Ana", "not-an-email", ""),
            CannedTransport::replying(200, ""),
        );

        assert_eq!(block_on(c.submit()), SubmissionState::Invalid);
        assert!(c.view().status().text.contains("Por favor, insira um email válido."));
        assert_eq!(c.transport().calls.get(), 0);
    }

    #[test]
    fn digits_only_phone_is_sent() {
        let c = controller(
            FakeForm::filled("Ana", "a@b.com", "11987654321"),
            CannedTransport::replying(200, ""),
        );

        assert_eq!(block_on(c.submit()), SubmissionState::Success);
        assert_eq!(c.transport().calls.get(), 1);
    }

    #[test]
    fn success_thanks_visitor_and_clears_form() {
        let c = controller(
            FakeForm::filled("  Ana ", "a@b.com", ""),
            CannedTransport::replying(200, "{\"ok\":true}"),
        );

        assert_eq!(block_on(c.submit()), SubmissionState::Success);
        let status = c.view().status();
        assert_eq!(status.text, "Obrigado, Ana! Você foi adicionado à Lista VIP com sucesso!");
        assert_eq!(status.kind, StatusKind::Success);
        assert_eq!(c.view().read_fields(), SignupFields::default());
        assert_eq!(*c.view().busy_log.borrow(), vec![true, false]);
    }

    #[test]
    fn backend_errors_are_shown_verbatim() {
        let c = controller(
            FakeForm::filled("Ana", "a@b.com", ""),
            CannedTransport::replying(400, r#"{"errors":[{"message":"Email já cadastrado"}]}"#),
        );

        assert_eq!(block_on(c.submit()), SubmissionState::ServerError);
        let status = c.view().status();
        assert_eq!(status.text, "Email já cadastrado");
        assert_eq!(status.kind, StatusKind::Error);
        assert_eq!(c.view().read_fields().name, "Ana");
    }

    #[test]
    fn unstructured_backend_error_gets_generic_text() {
        let c = controller(
            FakeForm::filled("Ana", "a@b.com", ""),
            CannedTransport::replying(500, "Internal Server Error"),
        );

        assert_eq!(block_on(c.submit()), SubmissionState::ServerError);
        assert_eq!(c.view().status(), StatusMessage::error(GENERIC_FAILURE));
    }

    #[test]
    fn network_failure_shows_connectivity_text() {
        let c = controller(FakeForm::filled("Ana", "a@b.com", ""), CannedTransport::failing());

        assert_eq!(block_on(c.submit()), SubmissionState::NetworkError);
        let status = c.view().status();
        assert_eq!(status.text, CONNECTION_FAILURE);
        assert_eq!(status.kind, StatusKind::Error);
        assert_eq!(c.view().read_fields().email, "a@b.com");
        assert_eq!(*c.view().busy_log.borrow(), vec![true, false]);
    }

    #[test]
    fn unreadable_rejection_body_shows_connectivity_text() {
        let c = controller(
            FakeForm::filled("Ana", "a@b.com", ""),
            CannedTransport {
                reply: error_response(503, Err("body stream aborted")),
                calls: Cell::new(0),
            },
        );

        assert_eq!(block_on(c.submit()), SubmissionState::NetworkError);
        assert_eq!(c.view().status(), StatusMessage::error(CONNECTION_FAILURE));
        assert_eq!(c.view().read_fields().name, "Ana");
    }

    #[test]
    fn form_can_be_resubmitted_after_failure() {
        let c = controller(FakeForm::filled("Ana", "a@b.com", ""), CannedTransport::failing());

        block_on(c.submit());
        assert_eq!(block_on(c.submit()), SubmissionState::NetworkError);
        assert_eq!(c.transport().calls.get(), 2);
    }

    struct PendingTransport {
        reply: RefCell<Option<oneshot::Receiver<BackendResponse>>>,
        calls: Cell<usize>,
    }

    #[async_trait(?Send)]
    impl FormTransport for PendingTransport {
        async fn submit(&self) -> Result<BackendResponse, TransportError> {
            self.calls.set(self.calls.get() + 1);
            let rx = self.reply.borrow_mut().take().expect("single request");
            rx.await.map_err(|e| TransportError(e.to_string()))
        }
    }

    #[test]
    fn second_submit_while_in_flight_is_ignored() {
        let (tx, rx) = oneshot::channel();
        let c = SubmissionController::new(
            FakeForm::filled("Ana", "a@b.com", ""),
            PendingTransport { reply: RefCell::new(Some(rx)), calls: Cell::new(0) },
        );

        block_on(async {
            let mut first = Box::pin(c.submit());
            assert!(futures::poll!(first.as_mut()).is_pending());
            assert_eq!(c.state(), SubmissionState::Submitting);
            assert_eq!(c.view().status(), StatusMessage::sending());

            assert_eq!(c.submit().await, SubmissionState::Submitting);
            assert_eq!(c.transport().calls.get(), 1);

            tx.send(BackendResponse { status: 200, body: String::new() }).unwrap();
            assert_eq!(first.await, SubmissionState::Success);
        });
        assert_eq!(c.state(), SubmissionState::Success);
    }
}
