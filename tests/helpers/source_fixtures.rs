//! Lua sources shared by several test modules.

pub const PLAYER: &str = r#"local M = {}

-- Deal damage to a target.
-- @param target Enemy
function M.attack(self, target)
    target:hit(self.power)
end

-- @private
function M:recharge()
end

function M:heal(amount)
end

return M
"#;

pub const WIDGET: &str = r#"local M = {}

function M.new()
    return setmetatable({}, { __index = M })
end

function M:show()
end

function M:hide()
end

return M
"#;

pub const HUD: &str = r#"local M = {}

function M:init()
    -- @type Widget
    self.view = Widget.new()
    self.view:
end

return M
"#;

pub const PANEL: &str = r#"local M = {}

M.args = {
    ok = UI.Button,
    icon = UI.Image,
    root = "Transform",
}

function M:init()
    self._ok:
    self._icon.
end

return M
"#;

pub const CONFIG: &str = r#"local Colors = {
    -- primary red
    red = 0xff0000,
    green = 0x00ff00,
    nested = { deep = true },
}

SPEED = 10
"#;
