use serde_json::Value;

use crate::Instance;

/// Options handed through a render pass to every hook. Callers may pass any
/// JSON value; the runtime never inspects it.
pub type RenderOpts = Value;

/// The extension hooks a concrete component type may implement. Every hook
/// has a default, so implementors only write the steps they care about.
///
/// - `on_spawn` re-establishes transient state. It runs on every insertion
///   and on every `render()`, so it must be cheap and repeatable. It must
///   not inject content — content injected here would overwrite a warm
///   cache. Returning `false` marks the instance unspawned and aborts the
///   spawn step.
/// - `on_build` constructs the instance's content. This is where expensive
///   work belongs; the result is what a host application may serialize and
///   reinject later. It must fully replace any existing children — never
///   append to them. Returning `false` leaves `built` unset.
/// - `on_load` runs one tick after build, once newly injected content has
///   entered the tree and descendant instances have started their own
///   insertion passes.
/// - `on_removed` runs at removal from the tree and at the start of a
///   manual `render()`.
/// - `should_build` is the build-skip policy. The default builds only when
///   the instance has no child content, which is what makes reinjecting
///   cached markup cheap.
pub trait Component: 'static {
    fn on_spawn(&mut self, inst: &Instance, opts: Option<&RenderOpts>) -> bool {
        let _ = (inst, opts);
        true
    }

    fn on_build(&mut self, inst: &Instance, opts: Option<&RenderOpts>) -> bool {
        let _ = (inst, opts);
        true
    }

    fn on_load(&mut self, inst: &Instance, opts: Option<&RenderOpts>) {
        let _ = (inst, opts);
    }

    fn on_removed(&mut self, inst: &Instance) {
        let _ = inst;
    }

    fn should_build(&self, inst: &Instance) -> bool {
        inst.default_should_build()
    }
}
