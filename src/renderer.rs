use std::os::raw::c_char;
use std::ptr::null_mut;

use log::info;

use crate::error::ViewerError;
use crate::shader;

/// Location value GL reports for a uniform the linker stripped.
pub const LOCATION_ABSENT: i32 = -1;

/// The closed set of Shadertoy uniforms the harness declares. Each role is
/// resolved to a location exactly once at link time and consulted by role
/// afterwards; no name lookups happen at render time.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum UniformRole {
    Resolution,
    Time,
    Frame,
    ChannelTime,
    Mouse,
    Date,
    SampleRate,
    ChannelResolution,
    Channel0,
    Channel1,
    Channel2,
    Channel3,
}

impl UniformRole {
    pub const ALL: [UniformRole; 12] = [
        UniformRole::Resolution,
        UniformRole::Time,
        UniformRole::Frame,
        UniformRole::ChannelTime,
        UniformRole::Mouse,
        UniformRole::Date,
        UniformRole::SampleRate,
        UniformRole::ChannelResolution,
        UniformRole::Channel0,
        UniformRole::Channel1,
        UniformRole::Channel2,
        UniformRole::Channel3,
    ];

    /// NUL-terminated uniform name as declared in the fragment header.
    pub fn gl_name(self) -> &'static [u8] {
        match self {
            UniformRole::Resolution => b"iResolution\0",
            UniformRole::Time => b"iTime\0",
            UniformRole::Frame => b"iFrame\0",
            UniformRole::ChannelTime => b"iChannelTime\0",
            UniformRole::Mouse => b"iMouse\0",
            UniformRole::Date => b"iDate\0",
            UniformRole::SampleRate => b"iSampleRate\0",
            UniformRole::ChannelResolution => b"iChannelResolution\0",
            UniformRole::Channel0 => b"iChannel0\0",
            UniformRole::Channel1 => b"iChannel1\0",
            UniformRole::Channel2 => b"iChannel2\0",
            UniformRole::Channel3 => b"iChannel3\0",
        }
    }
}

/// Role-indexed uniform locations. An absent location is the expected state
/// for any uniform the user shader never references: the linker strips unused
/// uniforms, and most shaders use only a subset of the standard set.
pub struct UniformTable {
    locations: [i32; UniformRole::ALL.len()],
}

impl UniformTable {
    pub fn new() -> Self {
        Self {
            locations: [LOCATION_ABSENT; UniformRole::ALL.len()],
        }
    }

    pub fn set(&mut self, role: UniformRole, location: i32) {
        self.locations[role as usize] = location;
    }

    pub fn get(&self, role: UniformRole) -> i32 {
        self.locations[role as usize]
    }

    pub fn is_present(&self, role: UniformRole) -> bool {
        self.get(role) >= 0
    }
}

/// Last-applied framebuffer size. Starts at (-1, -1) so the first apply
/// always fires.
pub struct ViewportState {
    width: i32,
    height: i32,
}

impl ViewportState {
    pub fn new() -> Self {
        Self {
            width: -1,
            height: -1,
        }
    }

    /// Stores the new size and reports whether it differed from the stored
    /// pair. Repeated identical calls return false, so GPU-side state is
    /// touched at most once per distinct size.
    pub fn update(&mut self, width: i32, height: i32) -> bool {
        if self.width == width && self.height == height {
            return false;
        }
        self.width = width;
        self.height = height;
        true
    }
}

// NDC square as a 4-vertex triangle strip.
static QUAD_VERTICES: [f32; 8] = [
    -1.0, -1.0, //
    1.0, -1.0, //
    -1.0, 1.0, //
    1.0, 1.0, //
];

/// Owns the linked shader program for the process lifetime. Built exactly
/// once; rebuilding is not supported.
pub struct Renderer {
    program: u32,
    attrib_position: i32,
    uniforms: UniformTable,
    viewport: ViewportState,
}

impl Renderer {
    /// Compiles and links the harness program around `fragment_body`.
    /// Requires a current GL context.
    pub fn new(fragment_body: &str) -> Result<Self, ViewerError> {
        let vertex = Self::compile_shader(gl::VERTEX_SHADER, &shader::vertex_sources())?;
        let fragment = match Self::compile_shader(
            gl::FRAGMENT_SHADER,
            &shader::fragment_sources(fragment_body),
        ) {
            Ok(id) => id,
            Err(err) => {
                unsafe { gl::DeleteShader(vertex) };
                return Err(err);
            }
        };

        let program = Self::link_program(vertex, fragment)?;

        unsafe {
            // Shaders are compiled exactly once per run, so let the driver
            // drop its compiler caches.
            gl::ReleaseShaderCompiler();
            gl::UseProgram(program);
            gl::ValidateProgram(program);
        }

        let attrib_position =
            unsafe { gl::GetAttribLocation(program, b"iPosition\0".as_ptr() as _) };

        let mut uniforms = UniformTable::new();
        for role in UniformRole::ALL {
            let location =
                unsafe { gl::GetUniformLocation(program, role.gl_name().as_ptr() as _) };
            uniforms.set(role, location);
        }

        Ok(Self {
            program,
            attrib_position,
            uniforms,
            viewport: ViewportState::new(),
        })
    }

    /// Applies a framebuffer size. No-op when the size is unchanged;
    /// otherwise the resolution uniform (when the shader kept it) and the
    /// rasterizer viewport are updated together.
    pub fn resize(&mut self, width: i32, height: i32) {
        if !self.viewport.update(width, height) {
            return;
        }

        unsafe {
            if self.uniforms.is_present(UniformRole::Resolution) {
                gl::Uniform3f(
                    self.uniforms.get(UniformRole::Resolution),
                    width as f32,
                    height as f32,
                    0.0,
                );
            }
            gl::Viewport(0, 0, width, height);
        }

        info!("Setting window size to ({},{}).", width, height);
    }

    /// Draws one frame of the full-screen quad. The time uniform is pushed
    /// only when the shader kept it; the frame uniform is pushed
    /// unconditionally (a location of -1 is silently ignored by GL).
    pub fn render(&self, time: f64, frame: u32) {
        unsafe {
            if self.uniforms.is_present(UniformRole::Time) {
                gl::Uniform1f(self.uniforms.get(UniformRole::Time), time as f32);
            }
            gl::Uniform1f(self.uniforms.get(UniformRole::Frame), frame as f32);

            gl::ClearColor(0.0, 0.0, 0.0, 1.0);
            gl::Clear(gl::COLOR_BUFFER_BIT);

            gl::EnableVertexAttribArray(self.attrib_position as u32);
            gl::VertexAttribPointer(
                self.attrib_position as u32,
                2,
                gl::FLOAT,
                gl::FALSE,
                0,
                QUAD_VERTICES.as_ptr() as *const _,
            );
            gl::DrawArrays(gl::TRIANGLE_STRIP, 0, 4);
        }
    }

    fn compile_shader(shader_type: u32, sources: &[&str]) -> Result<u32, ViewerError> {
        let pointers: Vec<*const c_char> = sources
            .iter()
            .map(|s| s.as_ptr() as *const c_char)
            .collect();
        let lengths: Vec<i32> = sources.iter().map(|s| s.len() as i32).collect();

        unsafe {
            let shader_id = gl::CreateShader(shader_type);
            gl::ShaderSource(
                shader_id,
                pointers.len() as i32,
                pointers.as_ptr(),
                lengths.as_ptr(),
            );
            gl::CompileShader(shader_id);

            let mut success: i32 = 0;
            gl::GetShaderiv(shader_id, gl::COMPILE_STATUS, &mut success);
            if success == 0 {
                let mut len: i32 = 0;
                gl::GetShaderiv(shader_id, gl::INFO_LOG_LENGTH, &mut len);
                let log = Self::fetch_info_log(len, |buffer| {
                    gl::GetShaderInfoLog(shader_id, len, null_mut(), buffer)
                });
                gl::DeleteShader(shader_id);
                Err(ViewerError::ShaderCompile(log))
            } else {
                Ok(shader_id)
            }
        }
    }

    fn link_program(vertex: u32, fragment: u32) -> Result<u32, ViewerError> {
        unsafe {
            let program = gl::CreateProgram();
            gl::AttachShader(program, vertex);
            gl::AttachShader(program, fragment);
            gl::LinkProgram(program);

            let mut success: i32 = 0;
            gl::GetProgramiv(program, gl::LINK_STATUS, &mut success);

            // The shader objects are never needed after the link attempt.
            gl::DeleteShader(vertex);
            gl::DeleteShader(fragment);

            if success == 0 {
                let mut len: i32 = 0;
                gl::GetProgramiv(program, gl::INFO_LOG_LENGTH, &mut len);
                let log = Self::fetch_info_log(len, |buffer| {
                    gl::GetProgramInfoLog(program, len, null_mut(), buffer)
                });
                gl::DeleteProgram(program);
                Err(ViewerError::ProgramLink(log))
            } else {
                Ok(program)
            }
        }
    }

    /// Fetches an info log only when the driver reports more than the lone
    /// NUL terminator.
    fn fetch_info_log(len: i32, read: impl FnOnce(*mut c_char)) -> String {
        if len <= 1 {
            return String::from("(no diagnostic log)");
        }

        let mut log = vec![0u8; len as usize];
        read(log.as_mut_ptr() as *mut c_char);
        log.truncate(len as usize - 1);
        String::from_utf8_lossy(&log).into_owned()
    }
}

impl Drop for Renderer {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteProgram(self.program);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_table_defaults_to_absent() {
        let table = UniformTable::new();
        for role in UniformRole::ALL {
            assert_eq!(table.get(role), LOCATION_ABSENT);
            assert!(!table.is_present(role));
        }
    }

    #[test]
    fn uniform_table_stores_resolved_locations() {
        let mut table = UniformTable::new();
        table.set(UniformRole::Time, 3);
        table.set(UniformRole::Frame, 0);
        assert_eq!(table.get(UniformRole::Time), 3);
        assert!(table.is_present(UniformRole::Frame));
        assert!(!table.is_present(UniformRole::Mouse));
    }

    #[test]
    fn uniform_names_are_nul_terminated_and_unique() {
        let mut seen = Vec::new();
        for role in UniformRole::ALL {
            let name = role.gl_name();
            assert_eq!(*name.last().unwrap(), 0);
            assert!(!seen.contains(&name));
            seen.push(name);
        }
    }

    #[test]
    fn viewport_applies_first_size() {
        let mut viewport = ViewportState::new();
        assert!(viewport.update(640, 360));
    }

    #[test]
    fn viewport_update_is_idempotent() {
        let mut viewport = ViewportState::new();
        assert!(viewport.update(640, 360));
        assert!(!viewport.update(640, 360));
        assert!(!viewport.update(640, 360));
        assert!(viewport.update(1280, 720));
        assert!(!viewport.update(1280, 720));
    }
}
