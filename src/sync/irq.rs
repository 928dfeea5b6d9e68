//! Hook de controle de interrupções.
//!
//! O Spinlock precisa desabilitar interrupções enquanto está adquirido,
//! mas este crate não conhece a CPU. A camada `arch` do kernel instala um
//! `IrqControl` no boot; sem ele o Spinlock apenas gira.

use spin::Once;

/// Operações de interrupção fornecidas pela arquitetura.
pub trait IrqControl: Sync {
    /// Desabilita interrupções e retorna se estavam habilitadas.
    fn save_and_disable(&self) -> bool;

    /// Reabilita interrupções se `was_enabled`.
    fn restore(&self, was_enabled: bool);
}

static IRQ_CONTROL: Once<&'static dyn IrqControl> = Once::new();

/// Instala o hook. Só a primeira chamada tem efeito.
pub fn install(control: &'static dyn IrqControl) -> bool {
    let mut installed = false;
    IRQ_CONTROL.call_once(|| {
        installed = true;
        control
    });
    installed
}

#[inline]
pub(crate) fn save_and_disable() -> bool {
    match IRQ_CONTROL.get() {
        Some(control) => control.save_and_disable(),
        None => false,
    }
}

#[inline]
pub(crate) fn restore(was_enabled: bool) {
    if let Some(control) = IRQ_CONTROL.get() {
        control.restore(was_enabled);
    }
}
