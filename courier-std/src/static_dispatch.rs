//! Static dispatch layer for zero-cost behavior chains.
//!
//! The behaviors of a [`StaticPipeline`] are stored in an HList, so the full
//! chain is known at compile time. The pipeline itself is a
//! [`RequestHandler`] and can be registered like any other handler.

use courier_core::{
    Behavior, BoxFuture, CancellationToken, DynRequestHandler, Link, Next, Outcome, Request,
    RequestHandler,
};

/// HList terminator - represents an empty behavior chain.
pub struct HNil;

/// HList cons cell - a behavior followed by more behaviors.
pub struct HCons<H, T> {
    /// The head behavior, run first.
    pub head: H,
    /// The tail of the chain.
    pub tail: T,
}

/// Trait for running a request through a static behavior chain.
pub trait BehaviorChain<R: Request>: Send + Sync + 'static {
    /// Run the chain, ending in `handler`.
    fn run<'a>(
        &'a self,
        handler: &'a dyn DynRequestHandler<R>,
        request: &'a R,
        cancel: &'a CancellationToken,
    ) -> BoxFuture<'a, Outcome<R::Output>>;
}

impl<R: Request> BehaviorChain<R> for HNil {
    fn run<'a>(
        &'a self,
        handler: &'a dyn DynRequestHandler<R>,
        request: &'a R,
        cancel: &'a CancellationToken,
    ) -> BoxFuture<'a, Outcome<R::Output>> {
        handler.handle_dyn(request, cancel)
    }
}

impl<R, H, T> BehaviorChain<R> for HCons<H, T>
where
    R: Request,
    H: Behavior<R>,
    T: BehaviorChain<R>,
{
    fn run<'a>(
        &'a self,
        handler: &'a dyn DynRequestHandler<R>,
        request: &'a R,
        cancel: &'a CancellationToken,
    ) -> BoxFuture<'a, Outcome<R::Output>> {
        Box::pin(async move {
            let rest = Rest {
                chain: &self.tail,
                handler,
            };
            self.head
                .handle(request, cancel, Next::new(&rest, request, cancel))
                .await
        })
    }
}

/// The tail of a chain bound to its handler.
struct Rest<'h, C, R: Request> {
    chain: &'h C,
    handler: &'h dyn DynRequestHandler<R>,
}

impl<C: BehaviorChain<R>, R: Request> Link<R> for Rest<'_, C, R> {
    fn call<'a>(
        &'a self,
        request: &'a R,
        cancel: &'a CancellationToken,
    ) -> BoxFuture<'a, Outcome<R::Output>> {
        self.chain.run(self.handler, request, cancel)
    }
}

// ============================================================================
// Static Pipeline
// ============================================================================

/// A handler wrapped in a statically-typed behavior chain.
///
/// # Example
/// ```ignore
/// let pipeline = StaticPipeline::new(
///     behaviors![LoggingBehavior::new(), ValidationBehavior],
///     CreateUserHandler::new(store),
/// );
/// let registry = RegistryBuilder::new()
///     .handler::<CreateUser, _>(pipeline)
///     .build()?;
/// ```
pub struct StaticPipeline<C, H> {
    chain: C,
    handler: H,
}

impl<C, H> StaticPipeline<C, H> {
    /// Wrap `handler` in `chain`.
    pub fn new(chain: C, handler: H) -> Self {
        Self { chain, handler }
    }

    /// The inner handler.
    pub fn handler(&self) -> &H {
        &self.handler
    }
}

impl<R, C, H> RequestHandler<R> for StaticPipeline<C, H>
where
    R: Request,
    C: BehaviorChain<R>,
    H: RequestHandler<R>,
{
    async fn handle(&self, request: &R, cancel: &CancellationToken) -> Outcome<R::Output> {
        self.chain.run(&self.handler, request, cancel).await
    }
}

// ============================================================================
// Builder pattern
// ============================================================================

/// Builder for constructing static behavior chains.
///
/// Behaviors are prepended, so the last one added ends up outermost.
pub struct StaticChainBuilder<T> {
    chain: T,
}

impl StaticChainBuilder<HNil> {
    /// Create a new empty chain builder.
    pub fn new() -> Self {
        Self { chain: HNil }
    }
}

impl Default for StaticChainBuilder<HNil> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> StaticChainBuilder<T> {
    /// Add a behavior to the front of the chain.
    pub fn prepend<B>(self, behavior: B) -> StaticChainBuilder<HCons<B, T>> {
        StaticChainBuilder {
            chain: HCons {
                head: behavior,
                tail: self.chain,
            },
        }
    }

    /// Finalize and return the built chain.
    pub fn build(self) -> T {
        self.chain
    }
}

// ============================================================================
// HList Length
// ============================================================================

/// Trait for computing HList length at compile time.
pub trait HListLen {
    /// The length of this HList.
    const LEN: usize;
}

impl HListLen for HNil {
    const LEN: usize = 0;
}

impl<H, T: HListLen> HListLen for HCons<H, T> {
    const LEN: usize = 1 + T::LEN;
}

// ============================================================================
// Macro
// ============================================================================

/// Construct a static behavior chain, outermost first.
///
/// # Example
/// ```ignore
/// let chain = behaviors![LoggingBehavior::new(), ValidationBehavior];
/// ```
#[macro_export]
macro_rules! behaviors {
    () => { $crate::static_dispatch::HNil };
    ($behavior:expr $(,)?) => {
        $crate::static_dispatch::HCons {
            head: $behavior,
            tail: $crate::static_dispatch::HNil,
        }
    };
    ($behavior:expr, $($rest:expr),+ $(,)?) => {
        $crate::static_dispatch::HCons {
            head: $behavior,
            tail: $crate::behaviors!($($rest),+),
        }
    };
}
