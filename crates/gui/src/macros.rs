pub(crate) mod widget {
    macro_rules! impl_as_variants {
        (
            $( $fn_name:ident, $fn_name_mut:ident => $variant:ident ( $widget_type:ty ) ),* $(,)?
        ) => {
            impl<M: Clone> Widget<M> {
                $(
                    pub const fn $fn_name(&self) -> Option<&$widget_type> {
                        match self {
                            Widget::$variant(inner) => Some(inner),
                            #[allow(unreachable_patterns)]
                            _ => None,
                        }
                    }
                    pub const fn $fn_name_mut(&mut self) -> Option<&mut $widget_type> {
                        match self {
                            Widget::$variant(inner) => Some(inner),
                            #[allow(unreachable_patterns)]
                            _ => None,
                        }
                    }
                )*
            }
        };
    }

    macro_rules! delegate_widget {
        (
            $( $variant:ident ),*
        ) => {
            fn bounds(&self) -> Box2D<f32> {
                match self {
                    $( Widget::$variant(w) => w.bounds(), )*
                }
            }

            fn is_enabled(&self) -> bool {
                match self {
                    $( Widget::$variant(w) => w.is_enabled(), )*
                }
            }

            fn set_enabled(&mut self, enabled: bool) {
                match self {
                    $( Widget::$variant(w) => w.set_enabled(enabled), )*
                }
            }

            fn update(&mut self, delta: f64) {
                match self {
                    $( Widget::$variant(w) => w.update(delta), )*
                }
            }

            fn render(&self, list: &mut DrawList) {
                match self {
                    $( Widget::$variant(w) => w.render(list), )*
                }
            }

            fn render_hover(&self, list: &mut DrawList) {
                match self {
                    $( Widget::$variant(w) => w.render_hover(list), )*
                }
            }

            fn render_focus(&self, list: &mut DrawList) {
                match self {
                    $( Widget::$variant(w) => w.render_focus(list), )*
                }
            }

            fn click(&mut self) -> Self::Message {
                match self {
                    $( Widget::$variant(w) => w.click(), )*
                }
            }
        };
    }

    // Allow usage in the crate without re-exporting it
    pub(crate) use {delegate_widget, impl_as_variants};
}
