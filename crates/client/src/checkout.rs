//! Order/payment checkout coordinator.
//!
//! An explicit state machine over the edges
//!
//! ```text
//! IDLE → VALIDATING → CREATING_ORDER → AWAITING_PAYMENT → SETTLING → DONE
//! ```
//!
//! with a failure edge from every state back to `IDLE`. The invariants the
//! machine protects:
//!
//! - the payment widget is never invoked before the remote order exists,
//! - the cart and the points ledger are mutated only in the settle step,
//!   which runs only after an explicit payment success (or a fully
//!   point-covered order), and both writes land before success is reported,
//! - no edge retries; every failure ends the attempt and the user starts
//!   over from idle.
//!
//! A payment failure leaves the already-created order in its server-side
//! pending state: the client does not auto-cancel, the server's expiry
//! policy owns that order from then on.

use maejang_core::order::{OrderDraft, OrderItem};
use maejang_core::types::{AddressId, OrderId, StoreId, Won};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::api::orders::{CreatedOrder, OrderApi};
use crate::cart::CartBook;
use crate::error::ClientError;
use crate::gateway::ApiResult;
use crate::rewards::PointsLedger;
use crate::storage::KvStore;

/// Seam for order creation, so the machine is testable without a network.
///
/// [`OrderApi`] is the production implementation.
pub trait PlaceOrder {
    /// Submit the draft and return the server-assigned order id.
    fn place(
        &self,
        draft: &OrderDraft,
    ) -> impl Future<Output = ApiResult<CreatedOrder>> + Send;
}

impl<S: KvStore> PlaceOrder for OrderApi<S> {
    async fn place(&self, draft: &OrderDraft) -> ApiResult<CreatedOrder> {
        self.create(draft).await
    }
}

/// What the coordinator hands to the external payment widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentRequest {
    /// Client-generated reference, unique per attempt.
    pub reference: String,
    /// The already-created remote order this payment settles.
    pub order_id: OrderId,
    /// Outstanding balance after points; always positive here.
    pub amount: Won,
    /// Display name shown in the widget ("매장직결 주문 (3개)").
    pub order_name: String,
}

/// The widget's verdict, reported through its callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentOutcome {
    /// Explicit success callback; the only trigger for settlement.
    Approved,
    /// The customer backed out.
    Cancelled,
    /// The provider refused or errored.
    Failed(String),
}

/// Seam for the external payment widget.
pub trait PaymentWidget {
    /// Present the widget for exactly `request.amount` and report the
    /// outcome.
    fn request_payment(
        &self,
        request: &PaymentRequest,
    ) -> impl Future<Output = PaymentOutcome> + Send;
}

/// A checkout request from the UI.
#[derive(Debug, Clone)]
pub struct CheckoutRequest {
    pub store_id: StoreId,
    /// The selected delivery address; `None` fails validation.
    pub address_id: Option<AddressId>,
    /// Free-form kitchen request.
    pub note: String,
    /// Points the customer asked to redeem; clamped, never rejected.
    pub redeem_points: Won,
}

/// Proof of a completed checkout, for the success screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutReceipt {
    pub order_id: OrderId,
    pub subtotal: Won,
    /// Actually redeemed points (after clamping).
    pub redeemed: Won,
    /// Amount that went through the payment widget; zero when points
    /// covered everything.
    pub paid: Won,
    pub accrued: Won,
    pub new_balance: Won,
}

/// Observable state of the machine.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CheckoutState {
    #[default]
    Idle,
    Validating,
    CreatingOrder,
    AwaitingPayment {
        order_id: OrderId,
        payable: Won,
    },
    Settling {
        order_id: OrderId,
    },
    Done(CheckoutReceipt),
}

/// Cart snapshot carried between edges within one attempt.
struct ValidatedCart {
    draft: OrderDraft,
    subtotal: Won,
    redeemed: Won,
    item_count: u32,
}

/// The checkout coordinator.
///
/// One instance per checkout surface; `run` drives a whole attempt and is
/// `&mut self`, so attempts cannot interleave.
pub struct CheckoutFlow<S: KvStore, P: PlaceOrder, W: PaymentWidget> {
    cart: CartBook<S>,
    ledger: PointsLedger<S>,
    orders: P,
    widget: W,
    state: CheckoutState,
}

impl<S: KvStore, P: PlaceOrder, W: PaymentWidget> CheckoutFlow<S, P, W> {
    /// Assemble the coordinator from its collaborators.
    pub const fn new(cart: CartBook<S>, ledger: PointsLedger<S>, orders: P, widget: W) -> Self {
        Self {
            cart,
            ledger,
            orders,
            widget,
            state: CheckoutState::Idle,
        }
    }

    /// The machine's current state, for rendering and tests.
    #[must_use]
    pub const fn state(&self) -> &CheckoutState {
        &self.state
    }

    /// Drive one checkout attempt end to end.
    ///
    /// # Errors
    ///
    /// Any failed edge returns the machine to idle and surfaces the error;
    /// the cart and ledger are untouched unless settlement ran.
    #[instrument(skip(self, request), fields(store_id = %request.store_id))]
    pub async fn run(&mut self, request: CheckoutRequest) -> Result<CheckoutReceipt, ClientError> {
        self.state = CheckoutState::Idle;

        let outcome = self.attempt(&request).await;
        match outcome {
            Ok(receipt) => {
                self.state = CheckoutState::Done(receipt.clone());
                info!(order_id = %receipt.order_id, paid = %receipt.paid, "checkout complete");
                Ok(receipt)
            }
            Err(e) => {
                // failure edge: back to idle, nothing committed
                self.state = CheckoutState::Idle;
                warn!(error = %e, "checkout aborted");
                Err(e)
            }
        }
    }

    async fn attempt(&mut self, request: &CheckoutRequest) -> Result<CheckoutReceipt, ClientError> {
        let validated = self.validate(request)?;
        let created = self.create_order(&validated).await?;
        let payable = self.await_payment(&validated, created).await?;
        self.settle(&validated, created, payable)
    }

    /// IDLE → VALIDATING. Fails fast on an empty cart or a missing
    /// address; no network is touched.
    fn validate(&mut self, request: &CheckoutRequest) -> Result<ValidatedCart, ClientError> {
        self.state = CheckoutState::Validating;

        let lines = self.cart.lines()?;
        if lines.is_empty() {
            return Err(ClientError::Validation(
                "장바구니가 비어있습니다.".to_string(),
            ));
        }
        let Some(address_id) = request.address_id else {
            return Err(ClientError::Validation(
                "배달 주소를 선택해주세요.".to_string(),
            ));
        };

        let subtotal: Won = lines.iter().map(maejang_core::CartLine::line_total).sum();
        let item_count: u32 = lines.iter().map(|l| l.quantity).sum();
        // out-of-range input is corrected here and echoed in the receipt
        let redeemed = self
            .ledger
            .clamp_for_checkout(request.redeem_points, subtotal)?;

        let items = lines
            .into_iter()
            .map(|line| OrderItem {
                menu_id: line.menu_id,
                option: if line.option_label.is_empty() {
                    None
                } else {
                    Some(line.option_label)
                },
                count: line.quantity,
            })
            .collect();

        Ok(ValidatedCart {
            draft: OrderDraft {
                store_id: request.store_id,
                address_id,
                request: request.note.clone(),
                items,
            },
            subtotal,
            redeemed,
            item_count,
        })
    }

    /// VALIDATING → CREATING_ORDER. On gateway failure the attempt aborts
    /// with the cart untouched.
    async fn create_order(&mut self, validated: &ValidatedCart) -> Result<CreatedOrder, ClientError> {
        self.state = CheckoutState::CreatingOrder;
        let created = self.orders.place(&validated.draft).await.into_result()?;
        debug!(order_id = %created.order_id, "remote order created");
        Ok(created)
    }

    /// CREATING_ORDER → AWAITING_PAYMENT, or a skip straight past it when
    /// points cover the whole order. Only an explicit approval continues.
    async fn await_payment(
        &mut self,
        validated: &ValidatedCart,
        created: CreatedOrder,
    ) -> Result<Won, ClientError> {
        let payable = validated.subtotal - validated.redeemed;
        if payable.is_zero() {
            debug!("fully covered by points; skipping payment widget");
            return Ok(payable);
        }

        self.state = CheckoutState::AwaitingPayment {
            order_id: created.order_id,
            payable,
        };

        let payment = PaymentRequest {
            reference: payment_reference(),
            order_id: created.order_id,
            amount: payable,
            order_name: format!("매장직결 주문 ({}개)", validated.item_count),
        };

        match self.widget.request_payment(&payment).await {
            PaymentOutcome::Approved => Ok(payable),
            // the created order stays pending server-side; its expiry is
            // the server's decision, not ours
            PaymentOutcome::Cancelled => {
                Err(ClientError::Validation("결제가 취소되었습니다.".to_string()))
            }
            PaymentOutcome::Failed(message) => Err(ClientError::Domain(message)),
        }
    }

    /// AWAITING_PAYMENT → SETTLING → DONE. Local-only: the cart clear and
    /// the ledger delta both persist before the receipt is returned. The
    /// cart clears first; if the ledger write then fails the customer is
    /// under-credited, but an already-paid cart can never be re-submitted.
    fn settle(
        &mut self,
        validated: &ValidatedCart,
        created: CreatedOrder,
        paid: Won,
    ) -> Result<CheckoutReceipt, ClientError> {
        self.state = CheckoutState::Settling {
            order_id: created.order_id,
        };

        let accrued = self.ledger.accrual_for(validated.subtotal)?;
        self.cart.clear()?;
        let new_balance = self.ledger.apply_outcome(validated.redeemed, accrued)?;

        Ok(CheckoutReceipt {
            order_id: created.order_id,
            subtotal: validated.subtotal,
            redeemed: validated.redeemed,
            paid,
            accrued,
            new_balance,
        })
    }
}

/// A widget-facing reference, unique per attempt.
fn payment_reference() -> String {
    format!("MJ-{}", Uuid::new_v4().simple())
}
